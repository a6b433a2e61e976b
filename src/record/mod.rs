//! Canonical design record
//!
//! The serde model of the structured description produced for every design:
//! file info, the optional preview payload, the per-color descriptors, and
//! the needle assignment section. Serialized pretty-printed (2-space) UTF-8
//! JSON.

use crate::needle::{AssignmentTable, BLACK_NEEDLE, WHITE_NEEDLE};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Color block segmentation
pub mod blocks;

/// Per-color descriptor building
pub mod colors;

/// Stream metrics
pub mod metrics;

/// File-level information about a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Base filename of the source file
    pub filename: String,
    /// Source path as given
    pub filepath: String,
    /// First 8 hex chars of the SHA-256 of the file bytes
    pub hash8: String,
    /// STITCH commands in the pattern
    pub stitch_count: usize,
    /// Bounding-box width in millimeters (1 decimal)
    pub width_mm: f64,
    /// Bounding-box height in millimeters (1 decimal)
    pub height_mm: f64,
    /// Distinct thread colors in the thread list
    pub color_count: usize,
    /// Bounding-box area in square millimeters (1 decimal)
    pub area_mm2: f64,
    /// COLOR_CHANGE commands in the stream
    pub color_changes: usize,
    /// Number of color blocks (not STOP commands; the stream-derived STOP
    /// count lives in [`metrics::StreamMetrics`])
    pub stops: usize,
    /// TRIM commands in the stream
    pub trims: usize,
    /// APPLIQUE commands in the stream
    pub appliques: usize,
}

/// Embedded preview image payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    /// Base64-encoded PNG bytes
    pub image_data: String,
    /// Always "png"
    pub format: String,
    /// Always "base64"
    pub encoding: String,
}

impl PreviewPayload {
    /// Wrap raw PNG bytes
    pub fn from_png(png: &[u8]) -> Self {
        Self {
            image_data: BASE64.encode(png),
            format: "png".to_string(),
            encoding: "base64".to_string(),
        }
    }
}

/// One color block's descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// 1-based position in block order
    pub sequence: usize,
    /// Assigned needle slot, if any
    pub needle_number: Option<u8>,
    /// Display code (chart-normalized)
    pub code: String,
    /// Raw catalog number
    pub original_code: String,
    /// Suffix of the catalog number after the first dash
    pub color_way: String,
    /// Display name; stop blocks carry a ", Stop" marker
    pub name: String,
    /// Thread chart/brand label
    pub chart: String,
    /// Packed 24-bit RGB
    pub rgb_int: u32,
    /// Uppercase `#RRGGBB`
    pub rgb_hex: String,
    /// STITCH commands inside this block
    pub stitch_count: usize,
    /// Whether a STOP command closed this block
    pub stop_flag: bool,
}

impl ColorRecord {
    /// Split the packed color into components
    pub fn rgb_components(&self) -> (u8, u8, u8) {
        (
            ((self.rgb_int >> 16) & 0xFF) as u8,
            ((self.rgb_int >> 8) & 0xFF) as u8,
            (self.rgb_int & 0xFF) as u8,
        )
    }
}

/// Fixed slot defaults communicated to consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedleDefaults {
    /// Slot reserved for black
    pub black_needle: u8,
    /// Slot reserved for white
    pub white_needle: u8,
}

impl Default for NeedleDefaults {
    fn default() -> Self {
        Self {
            black_needle: BLACK_NEEDLE,
            white_needle: WHITE_NEEDLE,
        }
    }
}

/// The needle assignment section of the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedleAssignment {
    /// Slot table, "1".."12"
    pub assignments: AssignmentTable,
    /// Reserved-slot defaults
    pub defaults: NeedleDefaults,
}

/// Producer stamp and raw bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Producing component
    pub generated_by: String,
    /// Producing version
    pub version: String,
    /// Raw pattern bounds (min_x, min_y, max_x, max_y) in design units
    pub pattern_bounds: (f64, f64, f64, f64),
}

/// The canonical record for one design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    /// File-level information
    pub file_info: FileInfo,
    /// Preview payload, when rendering was requested
    pub preview: Option<PreviewPayload>,
    /// Per-block color descriptors
    pub colors: Vec<ColorRecord>,
    /// Needle assignment section
    pub needle_assignment: NeedleAssignment,
    /// Producer metadata
    pub metadata: RecordMetadata,
}

impl DesignRecord {
    /// Serialize pretty-printed (2-space indent)
    pub fn to_json_pretty(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to a writer
    pub fn write_json(&self, writer: &mut impl Write) -> crate::utils::error::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        Ok(())
    }
}
