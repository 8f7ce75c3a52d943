//! Text Writer: update the displayed content of a located field element.

use crate::model::{Element, TagKind};

/// Overwrite the displayed text of `element` with `value`.
///
/// * A line run gets the value directly; its children's text and tails are
///   blanked (line runs should not have text-bearing children, but
///   malformed exports may include them).
/// * A content element with no line-run children gets the value as its
///   leading text.
/// * A content element with N line runs distributes the value's lines
///   (split on the `'\n'` control character) across the existing runs:
///   surplus runs are blanked rather than removed, so attribute-carried
///   positioning survives, and surplus lines are dropped: a field update
///   writes onto an already-laid-out template, it does not extend it.
/// * Any other element carrying the identifier gets the value as leading
///   text.
pub fn write_text(element: &mut Element, value: &str) {
    match element.kind {
        TagKind::LineRun => apply_value(element, value),
        TagKind::Content => {
            let run_indices: Vec<usize> = element
                .children
                .iter()
                .enumerate()
                .filter(|(_, c)| c.kind == TagKind::LineRun)
                .map(|(i, _)| i)
                .collect();
            if run_indices.is_empty() {
                element.text = Some(value.to_string());
                return;
            }
            let lines: Vec<&str> = value.split('\n').collect();
            for (k, &idx) in run_indices.iter().enumerate() {
                let line = lines.get(k).copied().unwrap_or("");
                apply_value(&mut element.children[idx], line);
            }
            // Clear the element's own leading text so the runs are the
            // only thing rendered.
            element.text = None;
        }
        TagKind::Container | TagKind::Group | TagKind::Other => {
            element.text = Some(value.to_string());
        }
    }
}

/// Write text to a node that may already have text and children, blanking
/// existing child text and tails so no stray content from the original
/// export lingers around the new value.
fn apply_value(node: &mut Element, value: &str) {
    node.text = Some(value.to_string());
    for child in &mut node.children {
        child.text = Some(String::new());
        child.tail = Some(String::new());
    }
    node.tail = Some(String::new());
}

/// Blank every `text`/`tspan` descendant of `group` except the one at the
/// (group-relative) path `keep`, so replaced content never lingers in
/// sibling nodes after a group-indirected field write.
pub(crate) fn blank_text_descendants(group: &mut Element, keep: &[usize]) {
    fn walk(el: &mut Element, path: &mut Vec<usize>, keep: &[usize]) {
        for i in 0..el.children.len() {
            path.push(i);
            if path.as_slice() != keep {
                let child = &mut el.children[i];
                if matches!(child.kind, TagKind::Content | TagKind::LineRun) {
                    apply_value(child, "");
                }
                walk(child, path, keep);
            }
            path.pop();
        }
    }
    let mut path = Vec::new();
    walk(group, &mut path, keep);
}
