//! Normalized JSON pattern interchange reader
//!
//! Reads the lossless interchange form (threads + command-tagged stitches)
//! into an [`EmbPattern`]. This is the bundled [`FormatLibrary`]
//! implementation; binary decoders for the machine formats plug in through
//! the same trait.

use crate::core::constants::*;
use crate::core::pattern::EmbPattern;
use crate::core::thread::{parse_color_hex, EmbThread};
use crate::formats::loader::FormatLibrary;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// JSON representation of an embroidery pattern
#[derive(Debug, Default, Serialize, Deserialize)]
struct JsonPattern {
    #[serde(default)]
    metadata: HashMap<String, String>,

    #[serde(default)]
    threads: Vec<JsonThread>,

    #[serde(default)]
    stitches: Vec<JsonStitch>,
}

/// JSON representation of a thread
#[derive(Debug, Serialize, Deserialize)]
struct JsonThread {
    color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    catalog_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<String>,
}

/// JSON representation of a stitch
#[derive(Debug, Serialize, Deserialize)]
struct JsonStitch {
    command: String,
    x: f64,
    y: f64,
}

/// Convert command name to its constant; unrecognized names are kept as
/// opaque non-stitch commands so they segment blocks without drawing
fn command_from_string(name: &str) -> u32 {
    match name {
        "STITCH" => STITCH,
        "JUMP" => JUMP,
        "TRIM" => TRIM,
        "STOP" => STOP,
        "END" => END,
        "COLOR_CHANGE" => COLOR_CHANGE,
        "SEQUIN_MODE" => SEQUIN_MODE,
        "SEQUIN_EJECT" => SEQUIN_EJECT,
        "APPLIQUE" => APPLIQUE,
        _ => NO_COMMAND,
    }
}

fn to_pattern(json: JsonPattern) -> Result<EmbPattern> {
    let mut pattern = EmbPattern::new();

    for (key, value) in json.metadata {
        pattern.add_metadata(key, value);
    }

    for jt in json.threads {
        let mut thread = EmbThread::new(parse_color_hex(&jt.color)?);
        thread.description = jt.description;
        thread.catalog_number = jt.catalog_number;
        thread.brand = jt.brand;
        thread.chart = jt.chart;
        pattern.add_thread(thread);
    }

    for js in json.stitches {
        pattern.add_stitch_absolute(command_from_string(&js.command), js.x, js.y);
    }

    Ok(pattern)
}

/// Format library backed by the JSON interchange form
#[derive(Debug, Default)]
pub struct JsonPatternLibrary;

impl JsonPatternLibrary {
    /// Create a new interchange reader
    pub fn new() -> Self {
        Self
    }
}

impl FormatLibrary for JsonPatternLibrary {
    fn read(&self, path: &Path) -> Result<Option<EmbPattern>> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(_) => return Ok(None),
        };

        // Content sniff: interchange documents are JSON objects
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace());
        if start.map(|i| bytes[i]) != Some(b'{') {
            return Ok(None);
        }

        let json: JsonPattern = match serde_json::from_slice(&bytes) {
            Ok(p) => p,
            Err(_) => return Ok(None),
        };

        to_pattern(json).map(Some)
    }
}
