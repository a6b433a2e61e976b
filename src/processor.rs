//! End-to-end design processing
//!
//! Wires the pipeline together: load and hash the file, segment the stream
//! into color blocks, compute metrics and color descriptors, resolve needle
//! assignments (cached by content hash), optionally render the embedded
//! preview, and assemble the canonical record.

use crate::formats::loader::{FormatLibrary, LoadedDesign, Loader, MAX_FILE_SIZE};
use crate::needle::cache::{CacheEntry, NeedleCache};
use crate::needle::{assign_needles, AssignmentTable};
use crate::record::blocks::segment_blocks;
use crate::record::colors::build_color_records;
use crate::record::metrics::{compute_metrics, round1, UNITS_TO_MM};
use crate::record::{
    DesignRecord, FileInfo, NeedleAssignment, NeedleDefaults, PreviewPayload, RecordMetadata,
};
use crate::render::{render_png, RenderSettings};
use crate::utils::error::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Processing options
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Render and embed the preview payload; when false the record carries
    /// `preview: null`
    pub include_preview: bool,
    /// Settings for the embedded preview
    pub preview: RenderSettings,
    /// Needle cache file; `None` disables persistence (assignments are
    /// still deterministic for a given file)
    pub cache_path: Option<PathBuf>,
    /// Upload size cap in bytes
    pub max_file_size: u64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            include_preview: true,
            preview: RenderSettings::embedded_preview(),
            cache_path: None,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

/// The design processing pipeline
pub struct DesignProcessor<'a> {
    library: &'a dyn FormatLibrary,
    options: ProcessOptions,
}

impl<'a> DesignProcessor<'a> {
    /// Create a processor over a format library with default options
    pub fn new(library: &'a dyn FormatLibrary) -> Self {
        Self {
            library,
            options: ProcessOptions::default(),
        }
    }

    /// Replace the processing options
    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    /// Process a design file into its canonical record
    pub fn process(&self, path: impl AsRef<Path>) -> Result<DesignRecord> {
        let loader = Loader::new(self.library).with_max_file_size(self.options.max_file_size);
        let design = loader.load(path)?;
        self.build_record(&design)
    }

    fn build_record(&self, design: &LoadedDesign) -> Result<DesignRecord> {
        let pattern = &design.pattern;

        let blocks = segment_blocks(pattern);
        let metrics = compute_metrics(pattern);
        let mut colors = build_color_records(&blocks);

        // Distinct thread colors across the whole thread list; can differ
        // from the block count
        let color_count = pattern
            .threads()
            .iter()
            .map(|t| t.color)
            .collect::<HashSet<u32>>()
            .len();

        let preview = if self.options.include_preview {
            Some(PreviewPayload::from_png(&render_png(
                pattern,
                &self.options.preview,
            )?))
        } else {
            None
        };

        let assignments = self.resolve_assignments(&design.hash8, &mut colors);

        let (min_x, min_y, max_x, max_y) = pattern.bounds();
        let file_info = FileInfo {
            filename: design.filename.clone(),
            filepath: design.path.display().to_string(),
            hash8: design.hash8.clone(),
            stitch_count: pattern.count_stitches(),
            width_mm: round1((max_x - min_x) * UNITS_TO_MM),
            height_mm: round1((max_y - min_y) * UNITS_TO_MM),
            color_count,
            area_mm2: metrics.area_mm2,
            color_changes: metrics.color_changes,
            stops: colors.len(),
            trims: metrics.trims,
            appliques: metrics.appliques,
        };

        Ok(DesignRecord {
            file_info,
            preview,
            colors,
            needle_assignment: NeedleAssignment {
                assignments,
                defaults: NeedleDefaults::default(),
            },
            metadata: RecordMetadata {
                generated_by: "stitchview".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                pattern_bounds: (min_x, min_y, max_x, max_y),
            },
        })
    }

    /// Cached needle assignments when available, fresh otherwise
    fn resolve_assignments(
        &self,
        hash8: &str,
        colors: &mut [crate::record::ColorRecord],
    ) -> AssignmentTable {
        let Some(cache_path) = &self.options.cache_path else {
            return assign_needles(colors);
        };

        let mut cache = NeedleCache::load(cache_path);
        if let Some(entry) = cache.get(hash8) {
            entry.restore(colors);
            return entry.assignments.clone();
        }

        let assignments = assign_needles(colors);
        cache.insert(hash8, CacheEntry::from_assignment(&assignments, colors));
        cache.save();
        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::json::JsonPatternLibrary;
    use std::io::Write;

    fn write_design(dir: &Path, name: &str, doc: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(doc.as_bytes()).unwrap();
        path
    }

    const TWO_COLOR: &str = r##"{
        "threads": [
            {"color": "#FF0000", "description": "Red", "catalog_number": "100-1"},
            {"color": "#0000FF", "description": "Blue", "catalog_number": "200-2"}
        ],
        "stitches": [
            {"command": "STITCH", "x": 0, "y": 0},
            {"command": "STITCH", "x": 100, "y": 0},
            {"command": "STITCH", "x": 100, "y": 100},
            {"command": "COLOR_CHANGE", "x": 100, "y": 100},
            {"command": "STITCH", "x": 200, "y": 100},
            {"command": "STITCH", "x": 200, "y": 200},
            {"command": "END", "x": 0, "y": 0}
        ]
    }"##;

    #[test]
    fn test_record_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_design(dir.path(), "two.json", TWO_COLOR);

        let library = JsonPatternLibrary::new();
        let record = DesignProcessor::new(&library).process(&path).unwrap();

        assert_eq!(record.file_info.stitch_count, 5);
        assert_eq!(record.file_info.width_mm, 20.0);
        assert_eq!(record.file_info.height_mm, 20.0);
        assert_eq!(record.file_info.area_mm2, 400.0);
        assert_eq!(record.file_info.color_changes, 1);
        assert_eq!(record.file_info.color_count, 2);
        assert_eq!(record.colors.len(), 2);
        assert_eq!(record.colors[0].stitch_count, 3);
        assert_eq!(record.colors[1].stitch_count, 2);
        assert_eq!(record.file_info.stops, 2); // block count, not STOP commands
        assert!(record.preview.is_some());
        assert_eq!(record.needle_assignment.assignments.len(), 12);
    }

    #[test]
    fn test_no_preview_fast_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_design(dir.path(), "two.json", TWO_COLOR);

        let library = JsonPatternLibrary::new();
        let options = ProcessOptions {
            include_preview: false,
            ..ProcessOptions::default()
        };
        let record = DesignProcessor::new(&library)
            .with_options(options)
            .process(&path)
            .unwrap();
        assert!(record.preview.is_none());
        // Everything else still populated
        assert_eq!(record.colors.len(), 2);
    }

    #[test]
    fn test_cache_keeps_assignments_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_design(dir.path(), "two.json", TWO_COLOR);
        let cache_path = dir.path().join("needle_cache.json");

        let library = JsonPatternLibrary::new();
        let options = ProcessOptions {
            include_preview: false,
            cache_path: Some(cache_path.clone()),
            ..ProcessOptions::default()
        };
        let processor = DesignProcessor::new(&library).with_options(options);

        let first = processor.process(&path).unwrap();
        assert!(cache_path.exists());
        let second = processor.process(&path).unwrap();

        for (a, b) in first.colors.iter().zip(&second.colors) {
            assert_eq!(a.needle_number, b.needle_number);
        }
        assert_eq!(
            first.needle_assignment.assignments,
            second.needle_assignment.assignments
        );
    }

    #[test]
    fn test_record_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_design(dir.path(), "two.json", TWO_COLOR);

        let library = JsonPatternLibrary::new();
        let record = DesignProcessor::new(&library).process(&path).unwrap();

        let json = record.to_json_pretty().unwrap();
        let reparsed: DesignRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, reparsed);
    }

    #[test]
    fn test_empty_pattern_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_design(dir.path(), "empty.json", r#"{"stitches": []}"#);

        let library = JsonPatternLibrary::new();
        let record = DesignProcessor::new(&library).process(&path).unwrap();

        assert_eq!(record.file_info.stitch_count, 0);
        assert_eq!(record.file_info.width_mm, 0.0);
        assert_eq!(record.file_info.area_mm2, 0.0);
        assert!(record.colors.is_empty());
        assert_eq!(record.file_info.stops, 0);
    }
}
