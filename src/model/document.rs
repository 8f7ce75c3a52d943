//! Document-level types.

use super::{Element, TagKind};
use crate::error::Result;
use crate::serialize::{self, WriteOptions};
use std::path::{Path, PathBuf};

/// A parsed SVG document.
///
/// The document owns the element tree; it is parsed from storage, mutated
/// in place by at most one transform per invocation, then serialized back.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    /// Root element of the tree (normally `<svg>`).
    pub root: Element,
}

impl SvgDocument {
    /// Wrap a root element as a document.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root's `width` attribute, as written.
    pub fn width(&self) -> Option<&str> {
        self.root.attr("width")
    }

    /// The root's `height` attribute, as written.
    pub fn height(&self) -> Option<&str> {
        self.root.attr("height")
    }

    /// The root's `viewBox` attribute, as written.
    pub fn view_box(&self) -> Option<&str> {
        self.root.attr("viewBox")
    }

    /// All content (`text`) elements in document order.
    pub fn text_elements(&self) -> impl Iterator<Item = &Element> {
        self.root.iter().filter(|e| e.kind == TagKind::Content)
    }

    /// Total number of elements in the tree.
    pub fn element_count(&self) -> usize {
        self.root.iter().count()
    }

    /// Serialize the tree to an XML string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        serialize::document_to_string(self, options)
    }

    /// Serialize the tree to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<()> {
        serialize::save(self, path.as_ref(), options)
    }

    /// Overwrite `path` in place, first copying the original bytes to a
    /// timestamped sibling backup when `backup` is set. Returns the backup
    /// path when one was written.
    pub fn save_in_place<P: AsRef<Path>>(
        &self,
        path: P,
        backup: bool,
        options: &WriteOptions,
    ) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let backup_path = if backup {
            Some(serialize::write_backup(path)?)
        } else {
            None
        };
        serialize::save(self, path, options)?;
        Ok(backup_path)
    }
}
