//! Document model for SVG trees.
//!
//! A typed view over the element tree: tag category, ordered attributes,
//! ordered children and the lxml-style text/tail payloads. The model is
//! read-only until the mutation phase; exactly one transform (line-break
//! normalization or a field update) mutates it per invocation.

mod document;
mod element;

pub use document::SvgDocument;
pub use element::{Element, Iter, TagKind};
