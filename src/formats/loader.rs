//! Design file loading and content hashing
//!
//! The loader is the seam between binary format decoders and the analysis
//! pipeline. Decoders implement [`FormatLibrary`]; the loader handles path
//! validation, the upload size cap, extension filtering, and the short
//! content hash used to key the needle-assignment cache.

use crate::core::pattern::EmbPattern;
use crate::formats::registry::FormatRegistry;
use crate::utils::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Default upload size cap: 50 MiB
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Backing decoder interface
///
/// A format library turns a design file into a normalized [`EmbPattern`].
/// `Ok(None)` means the decoder looked at the content and did not recognize
/// it; hard I/O failures surface as errors.
pub trait FormatLibrary {
    /// Attempt to decode the file at `path`
    fn read(&self, path: &Path) -> Result<Option<EmbPattern>>;
}

/// A successfully loaded design with its identity
#[derive(Debug, Clone)]
pub struct LoadedDesign {
    /// The normalized pattern
    pub pattern: EmbPattern,
    /// Source path as given
    pub path: PathBuf,
    /// Base filename component
    pub filename: String,
    /// First 8 hex chars of the SHA-256 of the raw file bytes
    pub hash8: String,
    /// Raw file size in bytes
    pub file_size: u64,
}

/// Design file loader
pub struct Loader<'a> {
    library: &'a dyn FormatLibrary,
    registry: FormatRegistry,
    max_file_size: u64,
}

impl<'a> Loader<'a> {
    /// Create a loader over the given format library
    pub fn new(library: &'a dyn FormatLibrary) -> Self {
        Self {
            library,
            registry: FormatRegistry::new(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Override the file size cap
    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = limit;
        self
    }

    /// Load and normalize a design file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedDesign> {
        let path = path.as_ref();

        let metadata =
            fs::metadata(path).map_err(|_| Error::UnreadableFile(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(Error::UnreadableFile(path.to_path_buf()));
        }

        let file_size = metadata.len();
        if file_size > self.max_file_size {
            return Err(Error::FileTooLarge {
                size: file_size,
                limit: self.max_file_size,
            });
        }

        if !self.registry.is_accepted(path) {
            return Err(Error::UnsupportedFormat(path.display().to_string()));
        }

        let hash8 = compute_hash8(path)?;

        let pattern = self
            .library
            .read(path)?
            .ok_or_else(|| Error::UnknownFormat(path.to_path_buf()))?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(LoadedDesign {
            pattern,
            path: path.to_path_buf(),
            filename,
            hash8,
            file_size,
        })
    }
}

/// Compute the short content hash of a file (first 8 hex chars of SHA-256)
pub fn compute_hash8(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path.as_ref())
        .map_err(|_| Error::UnreadableFile(path.as_ref().to_path_buf()))?;
    Ok(hash8_of_bytes(&bytes))
}

/// Short content hash of a byte slice
pub fn hash8_of_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(8);
    for byte in &digest[..4] {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
