//! Field Locator: resolve a semantic identifier to the content-bearing
//! element that should receive new text.
//!
//! The outer search is depth-first in document order over `id` attributes.
//! Design tools frequently attach the identifier to a wrapping group rather
//! than the text node itself, so a `g` match triggers a second,
//! breadth-first search of the group's subtree for the first `text` or
//! `tspan` descendant; breadth-first, so a shallow sibling text node is
//! preferred over a deeply nested one.
//!
//! Elements are addressed by index paths from the root. Paths are built per
//! invocation and never stored; they stand in for parent back-references,
//! which the owned tree deliberately does not have.

use crate::model::{Element, TagKind};
use std::collections::VecDeque;

/// Child-index path from the root to an element. An empty path addresses
/// the root itself.
pub type ElementPath = Vec<usize>;

/// Outcome of resolving an identifier against a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// The identified element itself should receive the text.
    Element(ElementPath),
    /// The identifier sat on a group; `content` is its first text-bearing
    /// descendant in breadth-first order.
    GroupContent {
        /// Path of the group carrying the identifier.
        group: ElementPath,
        /// Path of the descendant that should receive the text.
        content: ElementPath,
    },
    /// The identifier sat on a group with no text-bearing descendant.
    /// Present but empty: the caller surfaces a warning, no write occurs.
    EmptyGroup(ElementPath),
    /// No element carries the identifier.
    NotFound,
}

/// Resolve an identifier to its target element.
pub fn locate(root: &Element, id: &str) -> Located {
    let Some(path) = find_by_id(root, id) else {
        return Located::NotFound;
    };
    let Some(el) = resolve(root, &path) else {
        return Located::NotFound;
    };
    if el.kind != TagKind::Group {
        return Located::Element(path);
    }
    match find_content_descendant(el) {
        Some(rel) => {
            let mut content = path.clone();
            content.extend(rel);
            Located::GroupContent {
                group: path,
                content,
            }
        }
        None => Located::EmptyGroup(path),
    }
}

/// Depth-first pre-order search for the first element whose `id` attribute
/// equals `id`, regardless of tag kind. Duplicate ids are not enforced;
/// the first in document order wins.
pub fn find_by_id(root: &Element, id: &str) -> Option<ElementPath> {
    fn walk(el: &Element, id: &str, path: &mut ElementPath) -> bool {
        if el.id() == Some(id) {
            return true;
        }
        for (i, child) in el.children.iter().enumerate() {
            path.push(i);
            if walk(child, id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = ElementPath::new();
    walk(root, id, &mut path).then_some(path)
}

/// Breadth-first search below `el` for the first `text` or `tspan`
/// descendant. Returns a path relative to `el`.
pub fn find_content_descendant(el: &Element) -> Option<ElementPath> {
    let mut queue: VecDeque<ElementPath> = (0..el.children.len()).map(|i| vec![i]).collect();
    while let Some(path) = queue.pop_front() {
        let node = resolve(el, &path)?;
        if matches!(node.kind, TagKind::Content | TagKind::LineRun) {
            return Some(path);
        }
        for i in 0..node.children.len() {
            let mut child = path.clone();
            child.push(i);
            queue.push_back(child);
        }
    }
    None
}

/// Follow an index path from `root`.
pub fn resolve<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    let mut cur = root;
    for &i in path {
        cur = cur.children.get(i)?;
    }
    Some(cur)
}

/// Follow an index path from `root`, mutably.
pub fn resolve_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    let mut cur = root;
    for &i in path {
        cur = cur.children.get_mut(i)?;
    }
    Some(cur)
}
