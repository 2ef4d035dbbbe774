//! Integration tests for the field collector against the built-in sheets.

use dxh_model::{FieldValue, FormDocument, FormSchema, estimate_progress};
use proptest::prelude::*;

fn filled_dx_document() -> FormDocument {
    let schema = FormSchema::dx_hearing();
    let mut document = FormDocument::from_schema(&schema);
    document.set_text("name", "山田太郎").unwrap();
    document.select("department", Some("総務部")).unwrap();
    document
        .set_text("currentIssues", "月次レポートの作成に時間がかかる")
        .unwrap();
    document.set_checked("priority", "データ活用", true).unwrap();
    document.set_checked("priority", "業務効率化", true).unwrap();
    document
}

#[test]
fn test_collect_is_idempotent() {
    let document = filled_dx_document();
    assert_eq!(document.collect(), document.collect());
}

#[test]
fn test_collect_covers_every_schema_field() {
    let schema = FormSchema::dx_hearing();
    let snapshot = FormDocument::from_schema(&schema).collect();
    for name in schema.field_names() {
        assert!(snapshot.get(name).is_some(), "missing {name}");
    }
    assert_eq!(snapshot.len(), schema.fields.len());
}

#[test]
fn test_priority_order_follows_document() {
    let snapshot = filled_dx_document().collect();
    assert_eq!(
        snapshot.get("priority"),
        Some(&FieldValue::List(vec![
            "業務効率化".to_string(),
            "データ活用".to_string()
        ]))
    );
}

#[test]
fn test_dx_progress_caps_priority_at_three() {
    let schema = FormSchema::dx_hearing();
    let document = filled_dx_document();
    // 8 text fields, 3 selects, priority capped at 3; 5 entries filled
    let total = schema.progress_total();
    assert_eq!(total, 8 + 3 + 3);
    assert_eq!(estimate_progress(&document.collect(), total), 36);
}

#[test]
fn test_completed_dx_sheet_reaches_hundred() {
    let schema = FormSchema::dx_hearing();
    let mut document = FormDocument::from_schema(&schema);
    for field in schema.fields.iter().filter(|f| !f.kind.has_options()) {
        document.set_text(&field.name, "回答").unwrap();
    }
    document.select("department", Some("開発部")).unwrap();
    document.select("timeline", Some("3ヶ月以内")).unwrap();
    document.select("budget", Some("未定")).unwrap();
    for option in ["業務効率化", "情報共有の改善", "働き方改革"] {
        document.set_checked("priority", option, true).unwrap();
    }

    let progress = estimate_progress(&document.collect(), schema.progress_total());
    assert_eq!(progress, 100);
}

proptest! {
    #[test]
    fn prop_collect_twice_without_input_is_equal(
        name in ".{0,12}",
        issue in ".{0,40}",
        picks in proptest::collection::vec(any::<bool>(), 6),
    ) {
        let schema = FormSchema::dx_hearing();
        let options = schema.field("priority").unwrap().options.clone();
        let mut document = FormDocument::from_schema(&schema);
        document.set_text("name", &name).unwrap();
        document.set_text("currentIssues", &issue).unwrap();
        for (option, pick) in options.iter().zip(picks) {
            document.set_checked("priority", option, pick).unwrap();
        }
        prop_assert_eq!(document.collect(), document.collect());
    }
}
