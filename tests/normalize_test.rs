//! Integration tests for line-break normalization.

use std::fs;
use svgtext::{
    normalize_document, normalize_file, normalize_paths, parse_str, SaveOptions, WriteOptions,
};

fn no_decl() -> WriteOptions {
    WriteOptions::new().without_declaration()
}

#[test]
fn normalize_splits_direct_text_into_runs() {
    let mut doc = parse_str(concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">"#,
        r#"<text x="10" y="20" style="font-size:10px">Line A\nLine B\n\nLine D</text>"#,
        r#"<rect width="200" height="100"/>"#,
        "</svg>"
    ))
    .unwrap();

    assert_eq!(normalize_document(&mut doc), 1);

    let out = doc.to_xml_string(&no_decl()).unwrap();
    assert_eq!(
        out,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">"#,
            r#"<text x="10" y="20" style="font-size:10px" xml:space="preserve">"#,
            r#"<tspan x="10" dy="0">Line A</tspan>"#,
            r#"<tspan x="10" dy="12px">Line B</tspan>"#,
            r#"<tspan x="10" dy="12px"></tspan>"#,
            r#"<tspan x="10" dy="12px">Line D</tspan>"#,
            "</text>",
            r#"<rect width="200" height="100"/>"#,
            "</svg>"
        )
    );
}

#[test]
fn normalize_is_idempotent() {
    let mut doc = parse_str(concat!(
        "<svg>",
        r#"<text>alpha\nbeta</text>"#,
        r#"<text><tspan dy="4px">one\ntwo</tspan></text>"#,
        "</svg>"
    ))
    .unwrap();

    assert_eq!(normalize_document(&mut doc), 2);
    let once = doc.to_xml_string(&no_decl()).unwrap();

    assert_eq!(normalize_document(&mut doc), 0);
    let twice = doc.to_xml_string(&no_decl()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn normalize_leaves_marker_free_documents_alone() {
    let body = concat!(
        "<svg>",
        r#"<text x="1">plain</text>"#,
        "<text><tspan>run</tspan></text>",
        "</svg>"
    );
    let mut doc = parse_str(body).unwrap();
    assert_eq!(normalize_document(&mut doc), 0);
    assert_eq!(doc.to_xml_string(&no_decl()).unwrap(), body);
}

#[test]
fn normalize_file_writes_backup_then_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("label.svg");
    let original = r#"<svg><text>a\nb</text></svg>"#;
    fs::write(&input, original).unwrap();

    let report = normalize_file(&input, None, &SaveOptions::new()).unwrap();
    assert_eq!(report.changed, 1);

    let backup = report.backup.expect("backup path");
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);

    let rewritten = fs::read_to_string(&input).unwrap();
    assert!(rewritten.starts_with("<?xml"));
    assert!(rewritten.contains("<tspan"));
    assert!(!rewritten.contains("\\n"));
}

#[test]
fn normalize_file_without_backup() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("label.svg");
    fs::write(&input, r#"<svg><text>a\nb</text></svg>"#).unwrap();

    let report = normalize_file(&input, None, &SaveOptions::new().without_backup()).unwrap();
    assert_eq!(report.backup, None);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn normalize_file_with_output_leaves_input_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.svg");
    let output = dir.path().join("out.svg");
    let original = r#"<svg><text>a\nb</text></svg>"#;
    fs::write(&input, original).unwrap();

    let report = normalize_file(&input, Some(&output), &SaveOptions::new()).unwrap();
    assert_eq!(report.changed, 1);
    assert_eq!(report.backup, None);
    assert_eq!(fs::read_to_string(&input).unwrap(), original);
    assert!(fs::read_to_string(&output).unwrap().contains("<tspan"));
}

#[test]
fn normalize_paths_processes_each_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.svg");
    let b = dir.path().join("b.svg");
    fs::write(&a, r#"<svg><text>1\n2</text></svg>"#).unwrap();
    fs::write(&b, "<svg><text>plain</text></svg>").unwrap();

    let options = SaveOptions::new().without_backup().sequential();
    let results = normalize_paths(&[a.clone(), b.clone()], &options);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, a);
    assert_eq!(results[0].1.as_ref().unwrap().changed, 1);
    assert_eq!(results[1].1.as_ref().unwrap().changed, 0);
}

#[test]
fn normalize_file_parse_error_leaves_input_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.svg");
    let original = "<svg><text>a\\nb</svg></text>";
    fs::write(&input, original).unwrap();

    let result = normalize_file(&input, None, &SaveOptions::new());
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&input).unwrap(), original);
    // no backup either: parsing failed before any write
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
