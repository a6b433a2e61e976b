// File format handling - the loader seam between decoders and the pipeline

//! Design file loading
//!
//! This module contains the format registry, the loader that normalizes design
//! files into [`crate::core::pattern::EmbPattern`] values, and the bundled
//! JSON interchange reader.

/// Normalized JSON pattern interchange reader
pub mod json;

/// Loading and content hashing
pub mod loader;

/// Format registry and extension filtering
pub mod registry;
