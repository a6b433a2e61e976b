//! Content-addressed needle assignment cache
//!
//! Persists assignment tables keyed by the design's hash8 so reprocessing a
//! file keeps its colors on the same needles. The cache is advisory: a
//! missing, corrupt, or unwritable cache file never fails a request. Writes
//! replace the whole document (read, mutate in memory, write out), which is
//! the mandated discipline for the shared file.

use crate::needle::AssignmentTable;
use crate::record::ColorRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-color needle choice as persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedColor {
    /// 1-based color sequence number
    pub sequence: usize,
    /// Slot chosen for that sequence, if any
    pub needle_number: Option<u8>,
}

/// One design's persisted assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Slot table as produced by [`crate::needle::assign_needles`]
    pub assignments: AssignmentTable,
    /// Per-sequence needle choices
    pub colors: Vec<CachedColor>,
}

impl CacheEntry {
    /// Build an entry from an assignment result
    pub fn from_assignment(assignments: &AssignmentTable, colors: &[ColorRecord]) -> Self {
        Self {
            assignments: assignments.clone(),
            colors: colors
                .iter()
                .map(|c| CachedColor {
                    sequence: c.sequence,
                    needle_number: c.needle_number,
                })
                .collect(),
        }
    }

    /// Restore `needle_number` on the given colors from this entry
    ///
    /// Sequences missing from the entry keep their current (null) value.
    pub fn restore(&self, colors: &mut [ColorRecord]) {
        let by_sequence: HashMap<usize, Option<u8>> = self
            .colors
            .iter()
            .map(|c| (c.sequence, c.needle_number))
            .collect();

        for color in colors.iter_mut() {
            if let Some(Some(needle)) = by_sequence.get(&color.sequence) {
                color.needle_number = Some(*needle);
            }
        }
    }
}

/// The cache document: hash8 -> entry
#[derive(Debug, Default)]
pub struct NeedleCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl NeedleCache {
    /// Load the cache from a file; missing or unparseable files yield an
    /// empty cache that will be overwritten on the next save
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    /// Cache file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a usable entry (one with a populated slot table)
    pub fn get(&self, hash8: &str) -> Option<&CacheEntry> {
        self.entries
            .get(hash8)
            .filter(|entry| !entry.assignments.is_empty())
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, hash8: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(hash8.into(), entry);
    }

    /// Write the whole document back; I/O failures are swallowed because
    /// assignments were already returned to the caller
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_vec_pretty(&self.entries) {
            let _ = fs::write(&self.path, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::needle::{assign_needles, empty_table};

    fn color(seq: usize, code: &str, rgb: u32) -> ColorRecord {
        ColorRecord {
            sequence: seq,
            needle_number: None,
            code: code.to_string(),
            original_code: code.to_string(),
            color_way: code.to_string(),
            name: String::new(),
            chart: String::new(),
            rgb_int: rgb,
            rgb_hex: crate::core::thread::rgb_to_hex(rgb),
            stitch_count: 1,
            stop_flag: false,
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("needle_cache.json");

        let mut colors = vec![color(1, "42", 0x336699), color(2, "137", 0x000000)];
        let table = assign_needles(&mut colors);

        let mut cache = NeedleCache::load(&cache_path);
        assert!(cache.get("deadbeef").is_none());
        cache.insert("deadbeef", CacheEntry::from_assignment(&table, &colors));
        cache.save();

        let cache = NeedleCache::load(&cache_path);
        let entry = cache.get("deadbeef").expect("persisted entry");
        assert_eq!(entry.assignments, table);

        let mut fresh = vec![color(1, "42", 0x336699), color(2, "137", 0x000000)];
        entry.restore(&mut fresh);
        assert_eq!(fresh[0].needle_number, colors[0].needle_number);
        assert_eq!(fresh[1].needle_number, Some(5));
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("needle_cache.json");
        fs::write(&cache_path, b"{ not json").unwrap();

        let cache = NeedleCache::load(&cache_path);
        assert!(cache.get("deadbeef").is_none());

        // Next save overwrites the corrupt document
        cache.save();
        let reread = NeedleCache::load(&cache_path);
        assert!(reread.get("deadbeef").is_none());
        assert!(serde_json::from_slice::<serde_json::Value>(&fs::read(&cache_path).unwrap()).is_ok());
    }

    #[test]
    fn test_empty_assignment_table_is_not_a_hit() {
        let mut cache = NeedleCache::default();
        cache.insert(
            "cafebabe",
            CacheEntry {
                assignments: AssignmentTable::new(),
                colors: vec![],
            },
        );
        assert!(cache.get("cafebabe").is_none());

        cache.insert(
            "cafebabe",
            CacheEntry {
                assignments: empty_table(),
                colors: vec![],
            },
        );
        // All-null slots still count as populated
        assert!(cache.get("cafebabe").is_some());
    }

    #[test]
    fn test_restore_leaves_missing_sequences_null() {
        let entry = CacheEntry {
            assignments: empty_table(),
            colors: vec![CachedColor {
                sequence: 1,
                needle_number: Some(3),
            }],
        };
        let mut colors = vec![color(1, "a", 0x111111), color(2, "b", 0x606060)];
        entry.restore(&mut colors);
        assert_eq!(colors[0].needle_number, Some(3));
        assert_eq!(colors[1].needle_number, None);
    }
}
