//! Inline style handling: whitespace preservation and font-size lookup.

use crate::model::Element;
use regex::Regex;
use std::sync::OnceLock;

fn font_size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"font-size\s*:\s*([0-9.]+)px").expect("valid regex"))
}

fn white_space_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"white-space\s*:\s*[^;]+;?").expect("valid regex"))
}

fn repeated_semicolon_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r";{2,}").expect("valid regex"))
}

/// Extract a pixel font size from a style string, if one is declared.
pub fn parse_font_size(style: &str) -> Option<f64> {
    let captures = font_size_re().captures(style)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Mark an element as whitespace-preserving and drop any `white-space`
/// declaration from its inline style that would defeat explicit breaks.
///
/// Every other declaration is left byte-identical and in order.
pub fn sanitize(el: &mut Element) {
    el.set_attr("xml:space", "preserve");

    let cleaned = match el.attr("style") {
        Some(style) if style.contains("white-space") => {
            let cleaned = strip_white_space(style);
            (cleaned != style).then_some(cleaned)
        }
        _ => None,
    };
    if let Some(cleaned) = cleaned {
        el.set_attr("style", cleaned);
    }
}

/// Remove `white-space: ...` declarations from a style string, collapsing
/// any duplicate separators and trimming leading/trailing ones.
pub fn strip_white_space(style: &str) -> String {
    let removed = white_space_decl_re().replace_all(style, "");
    let collapsed = repeated_semicolon_re().replace_all(&removed, ";");
    collapsed
        .trim()
        .trim_matches(|c| c == ';' || c == ' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("font-size:10px"), Some(10.0));
        assert_eq!(parse_font_size("fill:red; font-size: 14.5px;"), Some(14.5));
        assert_eq!(parse_font_size("font-size:2em"), None);
        assert_eq!(parse_font_size("fill:red"), None);
    }

    #[test]
    fn test_strip_white_space_middle() {
        assert_eq!(
            strip_white_space("fill:red;white-space:pre;stroke:none"),
            "fill:red;stroke:none"
        );
    }

    #[test]
    fn test_strip_white_space_trailing() {
        assert_eq!(strip_white_space("fill:red; white-space: pre;"), "fill:red");
        assert_eq!(strip_white_space("white-space:pre"), "");
    }

    #[test]
    fn test_strip_white_space_leaves_other_declarations_intact() {
        assert_eq!(
            strip_white_space("font-size:10px;white-space : pre-wrap ;fill:#fff"),
            "font-size:10px;fill:#fff"
        );
    }

    #[test]
    fn test_sanitize_sets_preserve_and_cleans_style() {
        let mut el = Element::new("text");
        el.set_attr("style", "white-space:pre;fill:red");
        sanitize(&mut el);
        assert_eq!(el.attr("xml:space"), Some("preserve"));
        assert_eq!(el.attr("style"), Some("fill:red"));
    }

    #[test]
    fn test_sanitize_without_style() {
        let mut el = Element::new("text");
        sanitize(&mut el);
        assert_eq!(el.attr("xml:space"), Some("preserve"));
        assert_eq!(el.attr("style"), None);
    }
}
