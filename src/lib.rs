//! # stitchview
//!
//! A Rust library for inspecting embroidery design files and producing
//! thread-realistic previews.
//!
//! ## Features
//!
//! - **Design Records**: Segment a design's stitch stream into color blocks
//!   and build a canonical JSON record (geometry, command metrics, per-color
//!   descriptors)
//! - **Needle Planning**: Deterministically spread a design's colors over the
//!   12 machine needle slots, pinned black/white, persisted by content hash
//! - **TrueView Previews**: Rasterize designs to PNG with satin sheen, tatami
//!   row shading, and directional lighting
//! - **Pluggable Decoders**: Binary format decoders attach through the
//!   `FormatLibrary` trait; a JSON interchange reader is bundled
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stitchview::prelude::*;
//!
//! let library = JsonPatternLibrary::new();
//! let record = DesignProcessor::new(&library).process("design.json")?;
//! println!("{} colors, {} stitches",
//!     record.colors.len(), record.file_info.stitch_count);
//! # Ok::<(), stitchview::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod core;
pub mod formats;
pub mod needle;
pub mod processor;
pub mod record;
pub mod render;
pub mod utils;

// Re-export commonly used types at the crate root
pub use crate::core::constants::*;
pub use crate::core::pattern::EmbPattern;
pub use crate::core::thread::EmbThread;
pub use processor::{DesignProcessor, ProcessOptions};
pub use record::DesignRecord;
pub use render::RenderSettings;
pub use utils::error::Error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::constants::*;
    pub use crate::core::pattern::{EmbPattern, Stitch};
    pub use crate::core::thread::EmbThread;
    pub use crate::formats::json::JsonPatternLibrary;
    pub use crate::formats::loader::{FormatLibrary, LoadedDesign, Loader};
    pub use crate::processor::{DesignProcessor, ProcessOptions};
    pub use crate::record::DesignRecord;
    pub use crate::render::{render, render_png, RenderSettings};
    pub use crate::utils::error::*;
}
