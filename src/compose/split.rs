//! Line Splitter: rewrite `\n` markers into `tspan` line runs.

use super::style::{parse_font_size, sanitize};
use crate::model::{Element, TagKind};

/// The literal two-character escape marker for a line break: a backslash
/// followed by the letter `n`. Distinct from the U+000A control character;
/// exports encode breaks as literal escape text.
pub const LINE_BREAK_MARKER: &str = "\\n";

const DEFAULT_FONT_SIZE: f64 = 12.0;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Line height for a given declared font size: `1.2 ×` the size, falling
/// back to `1.2 × 12.0` when none is declared.
fn line_height_for(font_size: Option<f64>) -> f64 {
    font_size.unwrap_or(DEFAULT_FONT_SIZE) * LINE_HEIGHT_FACTOR
}

fn format_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

/// First horizontal position of an element; `x` may hold a list of numbers.
fn first_x(el: &Element) -> Option<&str> {
    el.attr("x").and_then(|x| x.split_whitespace().next())
}

/// New line runs take the source element's namespace prefix so they
/// serialize in the same namespace as their siblings.
fn run_tag_for(el: &Element) -> String {
    match el.prefix() {
        Some(prefix) => format!("{prefix}:tspan"),
        None => "tspan".to_string(),
    }
}

/// Replace `element`'s displayed content with one line run per line of
/// `raw_text`, split on the literal `\n` marker. Empty lines are kept
/// (a doubled marker yields a blank run). Any previous children are
/// replaced; the element's leading text is cleared.
///
/// Line 0 gets `dy="0"`; later lines get `dy` equal to `line_height`
/// with a `px` unit. Every run gets `x = base_x` when one is given.
pub fn split_lines(element: &mut Element, raw_text: &str, base_x: Option<&str>, line_height: f64) {
    let tag = run_tag_for(element);
    element.text = None;
    element.children.clear();
    for (i, line) in raw_text.split(LINE_BREAK_MARKER).enumerate() {
        let mut run = Element::new(tag.clone());
        if let Some(x) = base_x {
            run.set_attr("x", x);
        }
        if i == 0 {
            run.set_attr("dy", "0");
        } else {
            run.set_attr("dy", format_px(line_height));
        }
        run.text = Some(line.to_string());
        element.children.push(run);
    }
}

/// Split one existing line run that contains the marker into a run per
/// line. Line 0 inherits the old run's `dy` (its position relative to
/// preceding siblings is unchanged); later lines re-derive the line height
/// from the old run's own style, then the parent's font size.
fn split_run(old: &Element, parent_x: Option<&str>, parent_font: Option<f64>) -> Vec<Element> {
    let text = old.text.as_deref().unwrap_or_default();
    let tag = run_tag_for(old);
    let x = old.attr("x").or(parent_x);
    let first_dy = old.attr("dy").unwrap_or("0").to_string();
    let own_font = old.attr("style").and_then(parse_font_size);
    let later_dy = format_px(line_height_for(own_font.or(parent_font)));

    let mut runs: Vec<Element> = Vec::new();
    for (j, line) in text.split(LINE_BREAK_MARKER).enumerate() {
        let mut run = Element::new(tag.clone());
        if let Some(x) = x {
            run.set_attr("x", x);
        }
        if j == 0 {
            run.set_attr("dy", first_dy.clone());
        } else {
            run.set_attr("dy", later_dy.clone());
        }
        run.text = Some(line.to_string());
        runs.push(run);
    }
    if let Some(last) = runs.last_mut() {
        last.tail = old.tail.clone();
    }
    runs
}

/// Normalize one content element: split its direct text when it carries the
/// marker, otherwise splice any marker-carrying line-run children. Returns
/// whether anything changed; changed elements are also style-sanitized.
pub fn normalize_element(element: &mut Element) -> bool {
    if element.kind != TagKind::Content {
        return false;
    }
    let font_size = element.attr("style").and_then(parse_font_size);
    let line_height = line_height_for(font_size);
    let base_x = first_x(element).map(str::to_string);

    if element
        .text
        .as_deref()
        .is_some_and(|t| t.contains(LINE_BREAK_MARKER))
    {
        let raw = element.text.take().unwrap_or_default();
        split_lines(element, &raw, base_x.as_deref(), line_height);
        sanitize(element);
        return true;
    }

    let mut changed = false;
    let mut i = 0;
    while i < element.children.len() {
        let is_target = {
            let child = &element.children[i];
            child.kind == TagKind::LineRun
                && child
                    .text
                    .as_deref()
                    .is_some_and(|t| t.contains(LINE_BREAK_MARKER))
        };
        if is_target {
            let old = element.children.remove(i);
            let runs = split_run(&old, base_x.as_deref(), font_size);
            let added = runs.len();
            element.children.splice(i..i, runs);
            i += added;
            changed = true;
        } else {
            i += 1;
        }
    }
    if changed {
        sanitize(element);
    }
    changed
}
