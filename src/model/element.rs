//! Element tree types.
//!
//! Elements follow the lxml-style text/tail model: `text` is the content
//! before the first child element, `tail` is the content after the element's
//! own closing tag and belongs to the *parent's* text flow.
//!
//! ```text
//! <text>
//!   LEADING TEXT          <- the text element's `text`
//!   <tspan>run</tspan>
//!   TAIL TEXT             <- the tspan's `tail`
//! </text>
//! ```

/// Tag category, resolved once at parse time from the element's local name.
///
/// Matching on this enum instead of comparing tag strings makes an unhandled
/// category a compile-time gap rather than a silent fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagKind {
    /// Structural root-level containers: `svg`, `defs`, `symbol`, `switch`.
    Container,
    /// A `g` wrapper. Design tools often attach field ids here instead of
    /// on the text node itself.
    Group,
    /// A `text` element: holds displayed text directly or via line runs.
    Content,
    /// A `tspan`: one rendered line or run inside a content element.
    LineRun,
    /// Any other tag.
    #[default]
    Other,
}

impl TagKind {
    /// Classify a tag by its local (unprefixed) name.
    pub fn classify(local_name: &str) -> Self {
        match local_name {
            "svg" | "defs" | "symbol" | "switch" => TagKind::Container,
            "g" => TagKind::Group,
            "text" => TagKind::Content,
            "tspan" => TagKind::LineRun,
            _ => TagKind::Other,
        }
    }
}

/// A node in the parsed SVG tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name exactly as written in the source, including any namespace
    /// prefix (`text` or `svg:text`).
    pub tag: String,

    /// Tag category, derived from the local name at construction.
    pub kind: TagKind,

    /// Attributes in source order. Order is preserved across a rewrite so
    /// untouched elements round-trip byte-identical.
    pub attrs: Vec<(String, String)>,

    /// Child elements in source order.
    pub children: Vec<Element>,

    /// Text before the first child element.
    pub text: Option<String>,

    /// Text after this element's closing tag (owned by the parent's flow).
    pub tail: Option<String>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let kind = TagKind::classify(local_name_of(&tag));
        Self {
            tag,
            kind,
            ..Default::default()
        }
    }

    /// The tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name_of(&self.tag)
    }

    /// The namespace prefix of the tag name, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.tag.split_once(':').map(|(p, _)| p)
    }

    /// Get an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place (so the
    /// attribute keeps its position) or appending a new one.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(k, _)| k == name)?;
        Some(self.attrs.remove(idx).1)
    }

    /// The element's `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Depth-first pre-order traversal over this element and all of its
    /// descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Whether any direct child is a line run.
    pub fn has_line_runs(&self) -> bool {
        self.children.iter().any(|c| c.kind == TagKind::LineRun)
    }

    /// The displayed text of a content element: its leading text, or the
    /// line-break-joined text of its line-run children when present.
    pub fn display_text(&self) -> String {
        let runs: Vec<&str> = self
            .children
            .iter()
            .filter(|c| c.kind == TagKind::LineRun)
            .map(|c| c.text.as_deref().unwrap_or_default())
            .collect();
        if runs.is_empty() {
            self.text.clone().unwrap_or_default()
        } else {
            runs.join("\n")
        }
    }
}

fn local_name_of(tag: &str) -> &str {
    tag.rsplit_once(':').map_or(tag, |(_, local)| local)
}

/// Pre-order element iterator returned by [`Element::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        self.stack.extend(el.children.iter().rev());
        Some(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(TagKind::classify("svg"), TagKind::Container);
        assert_eq!(TagKind::classify("g"), TagKind::Group);
        assert_eq!(TagKind::classify("text"), TagKind::Content);
        assert_eq!(TagKind::classify("tspan"), TagKind::LineRun);
        assert_eq!(TagKind::classify("rect"), TagKind::Other);
        assert_eq!(TagKind::classify("textPath"), TagKind::Other);
    }

    #[test]
    fn test_prefixed_tag() {
        let el = Element::new("svg:text");
        assert_eq!(el.local_name(), "text");
        assert_eq!(el.prefix(), Some("svg"));
        assert_eq!(el.kind, TagKind::Content);

        let el = Element::new("tspan");
        assert_eq!(el.prefix(), None);
        assert_eq!(el.kind, TagKind::LineRun);
    }

    #[test]
    fn test_set_attr_preserves_position() {
        let mut el = Element::new("text");
        el.set_attr("x", "10");
        el.set_attr("y", "20");
        el.set_attr("style", "fill:red");
        el.set_attr("x", "30");

        let names: Vec<&str> = el.attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["x", "y", "style"]);
        assert_eq!(el.attr("x"), Some("30"));
    }

    #[test]
    fn test_remove_attr() {
        let mut el = Element::new("text");
        el.set_attr("id", "TITLE");
        assert_eq!(el.remove_attr("id"), Some("TITLE".to_string()));
        assert_eq!(el.attr("id"), None);
        assert_eq!(el.remove_attr("id"), None);
    }

    #[test]
    fn test_iter_preorder() {
        let mut root = Element::new("svg");
        let mut group = Element::new("g");
        group.children.push(Element::new("text"));
        root.children.push(group);
        root.children.push(Element::new("rect"));

        let tags: Vec<&str> = root.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, ["svg", "g", "text", "rect"]);
    }

    #[test]
    fn test_display_text_direct() {
        let mut el = Element::new("text");
        el.text = Some("Hello".to_string());
        assert_eq!(el.display_text(), "Hello");
    }

    #[test]
    fn test_display_text_joins_runs() {
        let mut el = Element::new("text");
        el.text = Some("ignored when runs exist".to_string());
        let mut a = Element::new("tspan");
        a.text = Some("Line A".to_string());
        let mut b = Element::new("tspan");
        b.text = Some("Line B".to_string());
        el.children.push(a);
        el.children.push(b);
        assert_eq!(el.display_text(), "Line A\nLine B");
    }
}
