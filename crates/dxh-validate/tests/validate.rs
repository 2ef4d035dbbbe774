//! Validator behavior against the built-in sheets.

use dxh_model::{FormDocument, FormSchema, FormSnapshot};
use dxh_validate::{Issue, validate};
use proptest::prelude::*;

#[test]
fn test_blank_dx_sheet_reports_everything_required() {
    let schema = FormSchema::dx_hearing();
    let snapshot = FormDocument::from_schema(&schema).collect();
    let report = validate(&schema, &snapshot);

    assert!(!report.valid);
    assert_eq!(
        report.missing_fields,
        [
            "所属部署",
            "現在の業務で困っていること・改善したいこと",
            "優先的に改善したい領域（最大3つ）",
        ]
    );
}

#[test]
fn test_quick_sheet_only_requires_current_issues() {
    let schema = FormSchema::quick_hearing();
    let snapshot = FormSnapshot::new()
        .with("name", "Taro")
        .with("currentIssues", "report automation")
        .with("freeComment", "");
    assert!(validate(&schema, &snapshot).valid);

    let report = validate(&schema, &FormSnapshot::new().with("name", "Taro"));
    assert_eq!(
        report.issues,
        [Issue::RequiredMissing {
            field: "currentIssues".to_string(),
            label: "現在の業務で困っていること・改善したいこと".to_string(),
        }]
    );
}

proptest! {
    #[test]
    fn prop_validation_is_deterministic(
        department in prop::option::of("[a-z]{0,5}"),
        issue in prop::option::of(".{0,10}"),
    ) {
        let schema = FormSchema::dx_hearing();
        let mut snapshot = FormSnapshot::new();
        if let Some(department) = department {
            snapshot.insert("department", department);
        }
        if let Some(issue) = issue {
            snapshot.insert("currentIssues", issue);
        }
        let before = snapshot.clone();
        let first = validate(&schema, &snapshot);
        let second = validate(&schema, &snapshot);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(snapshot, before);
    }
}
