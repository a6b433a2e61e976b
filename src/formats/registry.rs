//! Format Registry System
//!
//! Provides the table of accepted design formats and extension-based
//! filtering for incoming files.

use std::path::Path;

/// Information about a supported format
#[derive(Debug, Clone)]
pub struct FormatInfo {
    /// Format name (e.g., "DST", "PES")
    pub name: &'static str,
    /// Supported file extensions
    pub extensions: &'static [&'static str],
    /// Human-readable description
    pub description: &'static str,
}

/// Registry of accepted design formats
pub struct FormatRegistry {
    formats: Vec<FormatInfo>,
}

impl FormatRegistry {
    /// Create a new registry with all accepted formats
    pub fn new() -> Self {
        Self {
            formats: vec![
                FormatInfo {
                    name: "PES",
                    extensions: &["pes"],
                    description: "Brother PES format",
                },
                FormatInfo {
                    name: "DST",
                    extensions: &["dst"],
                    description: "Tajima DST format",
                },
                FormatInfo {
                    name: "JEF",
                    extensions: &["jef"],
                    description: "Janome JEF format",
                },
                FormatInfo {
                    name: "EXP",
                    extensions: &["exp"],
                    description: "Melco EXP format",
                },
                FormatInfo {
                    name: "VP3",
                    extensions: &["vp3"],
                    description: "Pfaff VP3 format",
                },
                FormatInfo {
                    name: "XXX",
                    extensions: &["xxx"],
                    description: "Singer XXX format",
                },
                FormatInfo {
                    name: "PEC",
                    extensions: &["pec"],
                    description: "Brother PEC format",
                },
                FormatInfo {
                    name: "HUS",
                    extensions: &["hus", "vip"],
                    description: "Husqvarna Viking HUS/VIP format",
                },
                FormatInfo {
                    name: "JSON",
                    extensions: &["json"],
                    description: "Normalized pattern interchange",
                },
            ],
        }
    }

    /// All registered formats
    pub fn formats(&self) -> &[FormatInfo] {
        &self.formats
    }

    /// Look up format information from a file path's extension
    pub fn get_format_from_path(&self, path: impl AsRef<Path>) -> Option<&FormatInfo> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();

        self.formats
            .iter()
            .find(|f| f.extensions.contains(&ext.as_str()))
    }

    /// Whether a path's extension belongs to an accepted format
    pub fn is_accepted(&self, path: impl AsRef<Path>) -> bool {
        self.get_format_from_path(path).is_some()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
