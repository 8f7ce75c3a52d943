//! Field updates: write new values into identified elements.
//!
//! Unresolved or empty identifiers are per-field outcomes, not errors; one
//! missing field never stops the rest from being processed.

use crate::compose::{blank_text_descendants, write_text};
use crate::error::{Error, Result};
use crate::locate::{locate, resolve_mut, Located};
use crate::model::{Element, SvgDocument};
use serde::Serialize;
use std::path::PathBuf;

/// One identifier → new-text pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// The `id` attribute value to resolve.
    pub id: String,
    /// The new displayed text. May contain `'\n'` to address multiple
    /// existing line runs.
    pub value: String,
}

impl FieldValue {
    /// Create a field value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Parse an `ID=VALUE` command-line specification.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidFieldSpec` when the `=` separator or the id
    /// is missing.
    pub fn parse(spec: &str) -> Result<Self> {
        let (id, value) = spec
            .split_once('=')
            .ok_or_else(|| Error::InvalidFieldSpec(spec.to_string()))?;
        if id.is_empty() {
            return Err(Error::InvalidFieldSpec(spec.to_string()));
        }
        Ok(Self::new(id, value))
    }
}

/// Per-field result of an update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOutcome {
    /// The field's text was rewritten.
    Updated,
    /// No element carries the identifier.
    NotFound,
    /// The identifier resolves to a group with no text-bearing descendant.
    Empty,
}

/// One field's identifier with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    /// The requested identifier.
    pub id: String,
    /// What happened to it.
    pub outcome: FieldOutcome,
}

/// Summary of an update pass over one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    /// Per-field outcomes, in request order.
    pub fields: Vec<FieldResult>,
    /// Backup written before an in-place save, when one was made.
    pub backup: Option<PathBuf>,
}

impl UpdateReport {
    /// Number of fields actually rewritten.
    pub fn updated_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| f.outcome == FieldOutcome::Updated)
            .count()
    }

    /// Whether at least one field was rewritten.
    pub fn any_updated(&self) -> bool {
        self.updated_count() > 0
    }

    /// Identifiers that did not resolve to any element.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.outcome == FieldOutcome::NotFound)
            .map(|f| f.id.as_str())
    }

    /// Serialize the report as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.map_err(|e| Error::Serialize(e.to_string()))
    }
}

/// Apply every field to the document, collecting per-field outcomes.
pub fn update_fields(doc: &mut SvgDocument, fields: &[FieldValue]) -> UpdateReport {
    let mut results = Vec::with_capacity(fields.len());
    for field in fields {
        let outcome = update_field(&mut doc.root, &field.id, &field.value);
        match outcome {
            FieldOutcome::Updated => log::debug!("updated field {:?}", field.id),
            FieldOutcome::NotFound => log::warn!("no element with id {:?}", field.id),
            FieldOutcome::Empty => {
                log::warn!("id {:?} is a group with no text descendant", field.id);
            }
        }
        results.push(FieldResult {
            id: field.id.clone(),
            outcome,
        });
    }
    UpdateReport {
        fields: results,
        backup: None,
    }
}

/// Resolve one identifier and write `value` into its target.
pub fn update_field(root: &mut Element, id: &str, value: &str) -> FieldOutcome {
    match locate(root, id) {
        Located::Element(path) => match resolve_mut(root, &path) {
            Some(el) => {
                write_text(el, value);
                FieldOutcome::Updated
            }
            None => FieldOutcome::NotFound,
        },
        Located::GroupContent { group, content } => {
            let keep = content[group.len()..].to_vec();
            if let Some(g) = resolve_mut(root, &group) {
                blank_text_descendants(g, &keep);
            }
            match resolve_mut(root, &content) {
                Some(el) => {
                    write_text(el, value);
                    FieldOutcome::Updated
                }
                None => FieldOutcome::NotFound,
            }
        }
        Located::EmptyGroup(_) => FieldOutcome::Empty,
        Located::NotFound => FieldOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_field_value_parse() {
        let f = FieldValue::parse("LOT=23-09").unwrap();
        assert_eq!(f.id, "LOT");
        assert_eq!(f.value, "23-09");

        // values may contain '='
        let f = FieldValue::parse("NOTE=a=b").unwrap();
        assert_eq!(f.value, "a=b");

        assert!(FieldValue::parse("NOVALUE").is_err());
        assert!(FieldValue::parse("=x").is_err());
    }

    #[test]
    fn test_update_field_direct() {
        let mut doc = parse_str(r#"<svg><text id="TITLE">old</text></svg>"#).unwrap();
        let outcome = update_field(&mut doc.root, "TITLE", "Grappa di Moscato");
        assert_eq!(outcome, FieldOutcome::Updated);
        assert_eq!(
            doc.root.children[0].text.as_deref(),
            Some("Grappa di Moscato")
        );
    }

    #[test]
    fn test_update_field_group_indirection() {
        let mut doc = parse_str(concat!(
            r#"<svg><g id="TITLE">"#,
            "<rect/><text>old</text>",
            "</g></svg>"
        ))
        .unwrap();
        let outcome = update_field(&mut doc.root, "TITLE", "new");
        assert_eq!(outcome, FieldOutcome::Updated);
        let text = &doc.root.children[0].children[1];
        assert_eq!(text.text.as_deref(), Some("new"));
    }

    #[test]
    fn test_update_field_group_blanks_siblings() {
        let mut doc = parse_str(concat!(
            r#"<svg><g id="F">"#,
            "<text>first</text><text>second</text>",
            "</g></svg>"
        ))
        .unwrap();
        assert_eq!(update_field(&mut doc.root, "F", "new"), FieldOutcome::Updated);
        let group = &doc.root.children[0];
        assert_eq!(group.children[0].text.as_deref(), Some("new"));
        assert_eq!(group.children[1].text.as_deref(), Some(""));
    }

    #[test]
    fn test_update_field_outcomes() {
        let mut doc =
            parse_str(r#"<svg><g id="EMPTY"><rect/></g></svg>"#).unwrap();
        assert_eq!(
            update_field(&mut doc.root, "EMPTY", "x"),
            FieldOutcome::Empty
        );
        assert_eq!(
            update_field(&mut doc.root, "MISSING", "x"),
            FieldOutcome::NotFound
        );
    }

    #[test]
    fn test_report_to_json() {
        let mut doc = parse_str(r#"<svg><text id="T">x</text></svg>"#).unwrap();
        let report = update_fields(&mut doc, &[FieldValue::new("T", "y")]);

        let pretty = report.to_json(true).unwrap();
        assert!(pretty.contains("\"updated\""));
        assert!(pretty.contains('\n'));

        let compact = report.to_json(false).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_update_fields_processes_all() {
        let mut doc = parse_str(concat!(
            "<svg>",
            r#"<text id="TITLE">a</text>"#,
            r#"<text id="DESCRIPTION">b</text>"#,
            "</svg>"
        ))
        .unwrap();
        let fields = [
            FieldValue::new("TITLE", "T"),
            FieldValue::new("MISSING", "x"),
            FieldValue::new("DESCRIPTION", "D"),
        ];
        let report = update_fields(&mut doc, &fields);
        assert_eq!(report.updated_count(), 2);
        assert!(report.any_updated());
        assert_eq!(report.missing().collect::<Vec<_>>(), vec!["MISSING"]);
        assert_eq!(doc.root.children[1].text.as_deref(), Some("D"));
    }
}
