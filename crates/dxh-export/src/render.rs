//! Transcript rendering.

use chrono::NaiveDateTime;

use dxh_model::{FieldSpec, FormSchema, FormSnapshot};

use crate::options::{LIST_SEPARATOR, TranscriptFormat, TranscriptOptions};

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const RULE: &str = "=====================================";

/// Render every schema field in declaration order.
///
/// Fields left empty show the placeholder; multi-select entries are joined
/// with [`LIST_SEPARATOR`]. Snapshot entries the schema does not declare are
/// not rendered.
pub fn render(
    schema: &FormSchema,
    snapshot: &FormSnapshot,
    at: NaiveDateTime,
    options: &TranscriptOptions,
) -> String {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    match options.format {
        TranscriptFormat::Markdown => render_markdown(schema, snapshot, &timestamp, options),
        TranscriptFormat::Text => render_text(schema, snapshot, &timestamp, options),
    }
}

fn display_value(field: &FieldSpec, snapshot: &FormSnapshot, placeholder: &str) -> String {
    match snapshot.get(&field.name) {
        Some(value) if value.is_filled() => value.joined(LIST_SEPARATOR),
        _ => placeholder.to_string(),
    }
}

/// Section heading to emit before `field`, if it opens a new section.
fn section_change<'a>(previous: &mut Option<&'a str>, field: &'a FieldSpec) -> Option<&'a str> {
    let section = field.section.as_deref();
    if section == *previous {
        return None;
    }
    *previous = section;
    section
}

fn render_text(
    schema: &FormSchema,
    snapshot: &FormSnapshot,
    timestamp: &str,
    options: &TranscriptOptions,
) -> String {
    let mut lines = vec![
        schema.title.clone(),
        RULE.to_string(),
        format!("記入日時: {timestamp}"),
    ];

    let mut current = None;
    for field in &schema.fields {
        if let Some(section) = section_change(&mut current, field) {
            lines.extend([String::new(), format!("■ {section}")]);
        }
        lines.extend([
            String::new(),
            format!("【{}】", field.label),
            display_value(field, snapshot, &options.placeholder),
        ]);
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

fn render_markdown(
    schema: &FormSchema,
    snapshot: &FormSnapshot,
    timestamp: &str,
    options: &TranscriptOptions,
) -> String {
    let mut lines = vec![
        format!("# {}", schema.title),
        String::new(),
        format!("記入日時: {timestamp}"),
    ];

    let mut current = None;
    for field in &schema.fields {
        if let Some(section) = section_change(&mut current, field) {
            lines.extend([String::new(), format!("## {section}")]);
        }
        let heading = if field.section.is_some() { "###" } else { "##" };
        lines.extend([
            String::new(),
            format!("{heading} {}", field.label),
            String::new(),
            display_value(field, snapshot, &options.placeholder),
        ]);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Replace characters that are unsafe in file names with `_`.
///
/// Covers `/ \ : * ? " < > |`, whitespace and control characters.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `<prefix>_<timestamp>.<ext>`, sanitized.
pub fn transcript_file_name(prefix: &str, at: NaiveDateTime, format: TranscriptFormat) -> String {
    let stamp = at.format(TIMESTAMP_FORMAT);
    sanitize_file_name(&format!("{prefix}_{stamp}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn taro() -> FormSnapshot {
        FormSnapshot::new()
            .with("name", "Taro")
            .with("currentIssues", "report automation")
            .with("freeComment", "")
    }

    #[test]
    fn test_text_layout() {
        let options = TranscriptOptions::default().with_format(TranscriptFormat::Text);
        let text = render(&FormSchema::quick_hearing(), &taro(), at(), &options);

        let expected = "社内DX課題ヒアリングシート
=====================================
記入日時: 2025/01/15 10:30:00

【お名前】
Taro

【現在の業務で困っていること・改善したいこと】
report automation

【その他・要望】
（未記入）
=====================================";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_markdown_layout() {
        let md = render(
            &FormSchema::quick_hearing(),
            &taro(),
            at(),
            &TranscriptOptions::default(),
        );

        let expected = "# 社内DX課題ヒアリングシート

記入日時: 2025/01/15 10:30:00

## お名前

Taro

## 現在の業務で困っていること・改善したいこと

report automation

## その他・要望

（未記入）
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_markdown_groups_sections() {
        let snapshot = FormSnapshot::new()
            .with("department", "総務部")
            .with(
                "priority",
                vec!["業務効率化".to_string(), "データ活用".to_string()],
            );
        let md = render(
            &FormSchema::dx_hearing(),
            &snapshot,
            at(),
            &TranscriptOptions::default(),
        );

        assert!(md.starts_with("# 社内DX課題ヒアリングシート\n"));
        assert_eq!(md.matches("## 基本情報").count(), 1);
        assert_eq!(md.matches("## 現状の課題").count(), 1);
        assert!(md.contains("### 所属部署\n\n総務部\n"));
        assert!(md.contains("業務効率化、データ活用"));

        let basics = md.find("## 基本情報").unwrap();
        let issues = md.find("## 現状の課題").unwrap();
        let other = md.find("## その他\n").unwrap();
        assert!(basics < issues && issues < other);
    }

    #[test]
    fn test_blank_text_uses_placeholder() {
        let snapshot = FormSnapshot::new().with("name", "   ");
        let md = render(
            &FormSchema::quick_hearing(),
            &snapshot,
            at(),
            &TranscriptOptions::default(),
        );
        assert_eq!(md.matches("（未記入）").count(), 3);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name(r#"a/b\c:d*e?f"g<h>i|j k"#),
            "a_b_c_d_e_f_g_h_i_j_k"
        );
        assert_eq!(sanitize_file_name("DXヒアリング.md"), "DXヒアリング.md");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            transcript_file_name("DXヒアリング", at(), TranscriptFormat::Text),
            "DXヒアリング_2025_01_15_10_30_00.txt"
        );
    }
}
