//! SVG parsing module.
//!
//! Builds an owned [`Element`] tree from a quick-xml event stream. Text
//! events are routed to the enclosing element's `text` or to the previous
//! sibling's `tail`, preserving whitespace exactly as written. XML comments,
//! DOCTYPE declarations and processing instructions are dropped; CDATA is
//! folded into plain text.

mod reader;

pub use reader::{parse_file, parse_reader, parse_str};
