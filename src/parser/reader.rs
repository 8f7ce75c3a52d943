//! Event-stream to element-tree construction.

use crate::error::{Error, Result};
use crate::model::{Element, SvgDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parse an SVG file from a path.
///
/// # Errors
///
/// Returns `Error::Io` when the file cannot be read and `Error::Parse`
/// when the content is not well-formed XML.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SvgDocument> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    parse_str(&content)
}

/// Parse an SVG document from any reader.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<SvgDocument> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_str(&content)
}

/// Parse an SVG document from string content.
///
/// # Errors
///
/// Returns `Error::Parse` when the content is not well-formed XML or has
/// no root element. Parsing never mutates anything on disk.
pub fn parse_str(content: &str) -> Result<SvgDocument> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::Parse("multiple root elements".to_string()));
                }
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&e)?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::End(_)) => {
                // quick-xml has already checked the end name against the
                // open element, so the top of the stack is the match.
                let el = stack
                    .pop()
                    .ok_or_else(|| Error::Parse("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                append_text(&mut stack, &text)?;
            }
            Ok(Event::CData(c)) => {
                let bytes = c.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                append_text(&mut stack, &text)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parse error in SVG: {e}");
                return Err(Error::Parse(e.to_string()));
            }
            Ok(_) => {} // declaration, comment, PI, doctype
        }
    }

    if !stack.is_empty() {
        return Err(Error::Parse("unclosed element at end of input".to_string()));
    }
    root.map(SvgDocument::new)
        .ok_or_else(|| Error::Parse("no root element".to_string()))
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = Element::new(tag);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::Parse(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| Error::Parse(err.to_string()))?
            .into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(el);
    } else {
        if root.is_some() {
            return Err(Error::Parse("multiple root elements".to_string()));
        }
        *root = Some(el);
    }
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    let Some(top) = stack.last_mut() else {
        // Whitespace between the prolog and the root is fine; anything
        // else is malformed.
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::Parse("text outside of the root element".to_string()));
    };
    let slot = match top.children.last_mut() {
        Some(last_child) => last_child.tail.get_or_insert_with(String::new),
        None => top.text.get_or_insert_with(String::new),
    };
    slot.push_str(text);
    Ok(())
}
