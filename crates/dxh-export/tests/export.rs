use std::fs;

use chrono::{NaiveDate, NaiveDateTime};

use dxh_export::{DirectorySink, TranscriptExporter, TranscriptFormat, TranscriptOptions};
use dxh_model::{FormSchema, FormSnapshot};

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(8, 5, 9)
        .unwrap()
}

#[test]
fn test_export_to_directory() {
    let temp = tempfile::tempdir().unwrap();
    let exporter = TranscriptExporter::new(
        TranscriptOptions::default().with_format(TranscriptFormat::Text),
        DirectorySink::new(temp.path()),
    );
    let snapshot = FormSnapshot::new()
        .with("name", "Taro")
        .with("currentIssues", "report automation")
        .with("freeComment", "");

    let exported = exporter
        .export(&FormSchema::quick_hearing(), &snapshot, at())
        .unwrap();

    assert_eq!(exported.file_name, "DXヒアリング_2025_03_01_08_05_09.txt");
    assert_eq!(exported.path, temp.path().join(&exported.file_name));

    let written = fs::read_to_string(&exported.path).unwrap();
    assert_eq!(written, exported.content);
    assert!(written.contains("report automation"));
    assert!(written.contains("（未記入）"));
}

#[test]
fn test_custom_prefix_is_sanitized() {
    let temp = tempfile::tempdir().unwrap();
    let options = TranscriptOptions {
        prefix: "team/retro notes".to_string(),
        ..TranscriptOptions::default()
    };
    let exporter = TranscriptExporter::new(options, DirectorySink::new(temp.path()));

    let exported = exporter
        .export(&FormSchema::quick_hearing(), &FormSnapshot::new(), at())
        .unwrap();

    assert_eq!(exported.file_name, "team_retro_notes_2025_03_01_08_05_09.md");
    assert!(exported.path.starts_with(temp.path()));
}

#[test]
fn test_every_declared_field_is_rendered() {
    let temp = tempfile::tempdir().unwrap();
    let schema = FormSchema::dx_hearing();
    let exporter = TranscriptExporter::new(
        TranscriptOptions::default(),
        DirectorySink::new(temp.path()),
    );

    let exported = exporter.export(&schema, &FormSnapshot::new(), at()).unwrap();
    for field in &schema.fields {
        assert!(
            exported.content.contains(&field.label),
            "missing label {}",
            field.label
        );
    }
    assert_eq!(
        exported.content.matches("（未記入）").count(),
        schema.fields.len()
    );
}
