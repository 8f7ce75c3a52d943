//! Serialization and backup.
//!
//! The tree is written back through quick-xml with attributes in stored
//! order; namespace declarations travel as ordinary attributes, so prefixes
//! come out exactly as they went in. Serializer configuration is an explicit
//! [`WriteOptions`] value passed per call; there is no process-wide
//! registry to mutate.

use crate::error::{Error, Result};
use crate::model::{Element, SvgDocument};
use chrono::Local;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for writing a document back out.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Emit an `<?xml version="1.0" encoding="utf-8"?>` declaration.
    pub xml_declaration: bool,
}

impl WriteOptions {
    /// Create write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the XML declaration.
    pub fn without_declaration(mut self) -> Self {
        self.xml_declaration = false;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
        }
    }
}

/// Serialize a document to an XML string.
///
/// # Errors
///
/// Returns `Error::Serialize` when event writing fails.
pub fn document_to_string(doc: &SvgDocument, options: &WriteOptions) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    if options.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| Error::Serialize(e.to_string()))?;
        writer
            .write_event(Event::Text(BytesText::from_escaped("\n")))
            .map_err(|e| Error::Serialize(e.to_string()))?;
    }
    write_element(&mut writer, &doc.root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Serialize(e.to_string()))
}

/// Serialize a document to a file.
pub fn save(doc: &SvgDocument, path: &Path, options: &WriteOptions) -> Result<()> {
    let xml = document_to_string(doc, options)?;
    let mut file = fs::File::create(path)?;
    file.write_all(xml.as_bytes())?;
    log::info!("saved {}", path.display());
    Ok(())
}

/// Sibling backup path for `path`, tagged with the current local time:
/// `label.svg` becomes `label.backup-20240131-093005.svg`.
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svg".to_string());
    path.with_file_name(format!("{stem}.backup-{stamp}.{ext}"))
}

/// Copy the original bytes of `path` to a timestamped sibling, returning
/// the backup path.
pub fn write_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup)?;
    log::info!("backup written: {}", backup.display());
    Ok(backup)
}

fn write_element<W: Write>(writer: &mut Writer<W>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.tag.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() && el.text.is_none() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Serialize(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::Serialize(e.to_string()))?;
    if let Some(text) = el.text.as_deref() {
        if !text.is_empty() {
            write_text_content(writer, text)?;
        }
    }
    for child in &el.children {
        write_element(writer, child)?;
        if let Some(tail) = child.tail.as_deref() {
            if !tail.is_empty() {
                write_text_content(writer, tail)?;
            }
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.tag.as_str())))
        .map_err(|e| Error::Serialize(e.to_string()))?;
    Ok(())
}

// Quotes stay literal in character data; only `&`, `<` and `>` are escaped,
// so untouched elements round-trip byte-identical.
fn write_text_content<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(|e| Error::Serialize(e.to_string()))
}
