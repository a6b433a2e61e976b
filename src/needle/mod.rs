//! Needle planning for multi-needle machines
//!
//! Maps a design's distinct colors onto the 12 physical needle slots. Black
//! and white threads are pinned to fixed slots so operators never re-thread
//! them; every other distinct color group is spread across the remaining
//! slots in an order that is random-looking but fully determined by the set
//! of colors present.

use crate::record::ColorRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content-addressed persistence of assignments
pub mod cache;

/// Deterministic seeding and shuffling
pub mod shuffle;

/// Number of physical needle slots
pub const NEEDLE_COUNT: u8 = 12;

/// Slot reserved for black thread
pub const BLACK_NEEDLE: u8 = 5;

/// Slot reserved for white thread
pub const WHITE_NEEDLE: u8 = 8;

/// Catalog code conventionally used for black
pub const BLACK_CODE: &str = "137";

/// Catalog code conventionally used for white
pub const WHITE_CODE: &str = "135";

/// The representative color placed on a needle slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedleSummary {
    /// Display code of the representative color
    pub code: String,
    /// Display name of the representative color
    pub name: String,
    /// Uppercase `#RRGGBB`
    pub rgb_hex: String,
}

impl NeedleSummary {
    fn from_color(color: &ColorRecord) -> Self {
        Self {
            code: color.code.clone(),
            name: color.name.clone(),
            rgb_hex: color.rgb_hex.clone(),
        }
    }
}

/// Slot table keyed "1".."12"; unassigned slots are null
///
/// A `BTreeMap<u8, _>` keeps numeric slot order and serializes with string
/// keys, matching the persisted cache document.
pub type AssignmentTable = BTreeMap<u8, Option<NeedleSummary>>;

/// Create a table with every slot present and empty
pub fn empty_table() -> AssignmentTable {
    (1..=NEEDLE_COUNT).map(|n| (n, None)).collect()
}

fn is_black(color: &ColorRecord) -> bool {
    let (r, g, b) = color.rgb_components();
    color.original_code == BLACK_CODE || (r < 50 && g < 50 && b < 50)
}

fn is_white(color: &ColorRecord) -> bool {
    let (r, g, b) = color.rgb_components();
    color.original_code == WHITE_CODE || (r > 200 && g > 200 && b > 200)
}

/// Assign the design's colors to needle slots
///
/// Sets `needle_number` on every color (or leaves it null for overflow
/// groups) and returns the slot table. Deterministic: the spread order of
/// non-reserved colors is a seeded shuffle keyed on the sorted set of
/// distinct color-group keys.
pub fn assign_needles(colors: &mut [ColorRecord]) -> AssignmentTable {
    let mut assignments = empty_table();
    let mut used: Vec<u8> = Vec::new();
    let mut pinned: Vec<bool> = vec![false; colors.len()];

    // Pin black to its reserved slot
    let black_indices: Vec<usize> = (0..colors.len()).filter(|&i| is_black(&colors[i])).collect();
    if let Some(&first) = black_indices.first() {
        assignments.insert(BLACK_NEEDLE, Some(NeedleSummary::from_color(&colors[first])));
        used.push(BLACK_NEEDLE);
        for &i in &black_indices {
            colors[i].needle_number = Some(BLACK_NEEDLE);
            pinned[i] = true;
        }
    }

    // Pin white likewise; a color is only ever in one bin
    let white_indices: Vec<usize> = (0..colors.len())
        .filter(|&i| !pinned[i] && is_white(&colors[i]))
        .collect();
    if let Some(&first) = white_indices.first() {
        assignments.insert(WHITE_NEEDLE, Some(NeedleSummary::from_color(&colors[first])));
        used.push(WHITE_NEEDLE);
        for &i in &white_indices {
            colors[i].needle_number = Some(WHITE_NEEDLE);
            pinned[i] = true;
        }
    }

    // Group the remaining colors by display-code + hex so duplicate
    // sequences share one slot; first-seen order is preserved
    let mut group_keys: Vec<String> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..colors.len() {
        if pinned[i] {
            continue;
        }
        let key = format!("{}_{}", colors[i].code, colors[i].rgb_hex);
        match group_keys.iter().position(|k| *k == key) {
            Some(g) => groups[g].push(i),
            None => {
                group_keys.push(key);
                groups.push(vec![i]);
            }
        }
    }

    // Spread groups over the free slots in seeded-shuffle order
    let mut available: Vec<u8> = (1..=NEEDLE_COUNT).filter(|n| !used.contains(n)).collect();
    let mut sorted_keys = group_keys.clone();
    sorted_keys.sort();
    let seed = shuffle::seed_from_key(&sorted_keys.concat());
    shuffle::seeded_shuffle(&mut available, seed);

    for (g, members) in groups.iter().enumerate() {
        let Some(&needle) = available.get(g) else {
            // More groups than free slots: overflow stays unassigned
            continue;
        };
        let representative = &colors[members[0]];
        assignments.insert(needle, Some(NeedleSummary::from_color(representative)));
        for &i in members {
            colors[i].needle_number = Some(needle);
        }
    }

    assignments
}
