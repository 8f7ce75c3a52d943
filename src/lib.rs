//! # svgtext
//!
//! Rewrite and normalize text runs in SVG documents.
//!
//! Design tools (Affinity among them) export multi-line text with literal
//! `\n` escape sequences and attach semantic field ids to text nodes or to
//! groups wrapping them. This library parses the SVG into an element tree,
//! rewrites the targeted text runs, and serializes the tree back with
//! everything else untouched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use svgtext::{normalize_document, parse_file, WriteOptions};
//!
//! fn main() -> svgtext::Result<()> {
//!     // Turn literal \n markers into tspan line runs
//!     let mut doc = parse_file("label.svg")?;
//!     let changed = normalize_document(&mut doc);
//!     println!("{changed} text elements rewritten");
//!     doc.save("label-fixed.svg", &WriteOptions::new())?;
//!     Ok(())
//! }
//! ```
//!
//! Update named fields in place (with a timestamped backup):
//!
//! ```no_run
//! use svgtext::{update_file, FieldValue, SaveOptions};
//!
//! let fields = [
//!     FieldValue::new("TITLE", "Grappa di Moscato"),
//!     FieldValue::new("DESCRIPTION", "Distillata con cura.\n42% vol, lotto 23-09."),
//! ];
//! let report = update_file("label.svg".as_ref(), None, &fields, &SaveOptions::new())?;
//! println!("{} fields updated", report.updated_count());
//! # Ok::<(), svgtext::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Line-break normalization**: literal `\n` markers become `tspan`
//!   runs with `dy` offsets derived from the declared font size
//! - **Field updates**: id-addressed text rewrites that tolerate ids on
//!   wrapping groups and reuse existing run layouts
//! - **Structure preservation**: untouched elements, attributes and
//!   namespace prefixes round-trip byte-identical
//! - **Backups**: in-place saves copy the original to a timestamped sibling
//! - **Batch mode**: independent documents processed in parallel with Rayon

pub mod compose;
pub mod error;
pub mod locate;
pub mod model;
pub mod parser;
pub mod serialize;
pub mod update;

// Re-export commonly used types
pub use compose::{
    normalize_document, normalize_element, parse_font_size, sanitize, split_lines,
    strip_white_space, write_text, LINE_BREAK_MARKER,
};
pub use error::{Error, Result};
pub use locate::{find_by_id, locate, resolve, resolve_mut, ElementPath, Located};
pub use model::{Element, SvgDocument, TagKind};
pub use parser::{parse_file, parse_reader, parse_str};
pub use serialize::{backup_path, WriteOptions};
pub use update::{
    update_field, update_fields, FieldOutcome, FieldResult, FieldValue, UpdateReport,
};

use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options for file-backed operations.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Copy the original to a timestamped sibling before an in-place save.
    pub backup: bool,
    /// Serializer configuration.
    pub write: WriteOptions,
    /// Process batch inputs in parallel.
    pub parallel: bool,
}

impl SaveOptions {
    /// Create save options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the timestamped backup on in-place saves.
    pub fn without_backup(mut self) -> Self {
        self.backup = false;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set serializer options.
    pub fn with_write(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            backup: true,
            write: WriteOptions::default(),
            parallel: true,
        }
    }
}

/// Result of normalizing one document.
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    /// Number of content elements rewritten.
    pub changed: usize,
    /// Backup written before an in-place save, when one was made.
    pub backup: Option<PathBuf>,
}

impl FixReport {
    /// Serialize the report as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| Error::Serialize(e.to_string()))
    }
}

/// Normalize the line breaks of one file.
///
/// With `output` the result is written there and the input left alone;
/// without it the input is overwritten in place, after a timestamped backup
/// unless `options` disables it. The input is only opened for writing at
/// the final save, so a failure anywhere earlier leaves it untouched.
pub fn normalize_file(
    input: &Path,
    output: Option<&Path>,
    options: &SaveOptions,
) -> Result<FixReport> {
    let mut doc = parse_file(input)?;
    let changed = normalize_document(&mut doc);
    let backup = match output {
        Some(out) => {
            doc.save(out, &options.write)?;
            None
        }
        None => doc.save_in_place(input, options.backup, &options.write)?,
    };
    Ok(FixReport { changed, backup })
}

/// Normalize a batch of files in place, each an independent unit of work.
/// Results come back in input order.
pub fn normalize_paths(
    inputs: &[PathBuf],
    options: &SaveOptions,
) -> Vec<(PathBuf, Result<FixReport>)> {
    if options.parallel {
        inputs
            .par_iter()
            .map(|p| (p.clone(), normalize_file(p, None, options)))
            .collect()
    } else {
        inputs
            .iter()
            .map(|p| (p.clone(), normalize_file(p, None, options)))
            .collect()
    }
}

/// Update named fields of one file. Output handling matches
/// [`normalize_file`]; unresolved fields are outcomes in the report, not
/// errors.
pub fn update_file(
    input: &Path,
    output: Option<&Path>,
    fields: &[FieldValue],
    options: &SaveOptions,
) -> Result<UpdateReport> {
    let mut doc = parse_file(input)?;
    let mut report = update_fields(&mut doc, fields);
    report.backup = match output {
        Some(out) => {
            doc.save(out, &options.write)?;
            None
        }
        None => doc.save_in_place(input, options.backup, &options.write)?,
    };
    Ok(report)
}
