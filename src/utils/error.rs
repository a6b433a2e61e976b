//! Error types for design processing
//!
//! Provides custom error types with automatic conversions from common error
//! sources using the thiserror crate for ergonomic error handling throughout
//! the library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stitchview operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Design file missing or unreadable
    #[error("Unreadable design file: {0}")]
    UnreadableFile(PathBuf),

    /// The backing format library did not recognize the file
    #[error("Unknown design format: {0}")]
    UnknownFormat(PathBuf),

    /// Unsupported file format/extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input exceeds the configured size cap
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge {
        /// Actual file size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Invalid color format
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Preview rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for stitchview operations
pub type Result<T> = std::result::Result<T, Error>;
