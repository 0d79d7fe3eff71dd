use confdiff_core::{diff_str, DiffOptions, InputFormat, Mapping, OutputFormat, RenderConfig};

#[test]
fn confdiff_core_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let before = Mapping::parse("{\"host\":\"localhost\",\"port\":80}", InputFormat::Json)?;
    let after = Mapping::parse("host: localhost\nport: 8080\ntls: true\n", InputFormat::Yaml)?;

    let diff = before.diff(&after, &DiffOptions::default());
    assert!(diff.has_changes());

    let tree = diff.render(OutputFormat::Tree, &RenderConfig::default())?;
    println!("{tree}");
    assert_eq!(tree, "{\n    host: localhost\n  - port: 80\n  + port: 8080\n  + tls: true\n}");

    let patched = diff.apply(&before)?;
    assert_eq!(patched, after);
    Ok(())
}

#[test]
fn unknown_format_is_a_caller_error() {
    let err = "html".parse::<OutputFormat>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown output format 'html' (expected one of: plain, tree, json)"
    );
}

#[test]
fn non_mapping_document_fails_before_diffing() {
    let err = diff_str("[1]", InputFormat::Json, "{}", InputFormat::Json, OutputFormat::Plain)
        .unwrap_err();
    assert_eq!(err.to_string(), "expected a mapping at the document root, found list");
}

#[test]
fn same_float_written_in_json_and_yaml_is_unchanged() {
    let rendered = diff_str(
        "{\"f\": 7.380019249181378e-29}",
        InputFormat::Json,
        "f: 7.380019249181378e-29\n",
        InputFormat::Yaml,
        OutputFormat::Plain,
    )
    .expect("both documents parse");
    assert_eq!(rendered, "");
}
