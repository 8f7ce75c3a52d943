//! Text-run composition: line splitting, field writing and style cleanup.
//!
//! Design tools often export multi-line text with the literal two-character
//! sequence `\n` in it. SVG collapses whitespace and most renderers do not
//! treat the sequence as a line break, so the text shows up on one line with
//! a visible `\n`. The splitter rewrites such content into `tspan` line runs
//! with `dy` offsets; the writer updates identified fields onto an existing
//! run layout; the sanitizer keeps inline styles from fighting the result.

mod split;
mod style;
mod write;

pub use split::{normalize_element, split_lines, LINE_BREAK_MARKER};
pub use style::{parse_font_size, sanitize, strip_white_space};
pub use write::write_text;

pub(crate) use write::blank_text_descendants;

use crate::model::{Element, SvgDocument, TagKind};

/// Rewrite every content element whose text (direct or inside a line run)
/// contains the `\n` marker. Returns the number of elements changed.
///
/// Running this twice is a no-op the second time: after one pass no text
/// contains the marker.
pub fn normalize_document(doc: &mut SvgDocument) -> usize {
    let mut changed = 0;
    walk(&mut doc.root, &mut changed);
    if changed == 0 {
        log::debug!("no line-break markers found in any text element");
    }
    changed
}

fn walk(el: &mut Element, changed: &mut usize) {
    if el.kind == TagKind::Content {
        if normalize_element(el) {
            *changed += 1;
        }
        return;
    }
    for child in &mut el.children {
        walk(child, changed);
    }
}
