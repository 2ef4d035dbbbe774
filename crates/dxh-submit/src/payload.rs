//! Submission payload: the snapshot as the endpoint expects it.

use chrono::NaiveDateTime;

use dxh_model::{FormSchema, FormSnapshot};

/// Delimiter used when a multi-select field is flattened into one parameter.
pub const LIST_DELIMITER: &str = ",";

/// Timestamp layout sent to the endpoint (`2025/01/15 10:30:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Flattened parameters for one submit attempt.
///
/// Built once per attempt and never modified; dropped when the attempt
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    timestamp: String,
    params: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// Flatten a snapshot in schema declaration order.
    ///
    /// Blank fields fall back to the schema's `payload_default`; list fields
    /// are joined with [`LIST_DELIMITER`]. Snapshot entries the schema does
    /// not declare are appended afterwards in name order.
    pub fn build(schema: &FormSchema, snapshot: &FormSnapshot, sent_at: NaiveDateTime) -> Self {
        let mut params = Vec::with_capacity(snapshot.len().max(schema.fields.len()));

        for field in &schema.fields {
            let value = snapshot
                .get(&field.name)
                .map(|v| v.joined(LIST_DELIMITER))
                .unwrap_or_default();
            let value = match &field.payload_default {
                Some(default) if value.trim().is_empty() => default.clone(),
                _ => value,
            };
            params.push((field.name.clone(), value));
        }

        for (name, value) in snapshot.iter() {
            if schema.field(name).is_none() {
                params.push((name.to_string(), value.joined(LIST_DELIMITER)));
            }
        }

        Self {
            timestamp: sent_at.format(TIMESTAMP_FORMAT).to_string(),
            params,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Value of one parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == "timestamp" {
            return Some(&self.timestamp);
        }
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in wire order, `timestamp` last.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .chain(std::iter::once(("timestamp", self.timestamp.as_str())))
    }

    /// `application/x-www-form-urlencoded` encoding of [`Self::pairs`].
    pub fn to_form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sent_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_blank_fields() {
        let schema = FormSchema::dx_hearing();
        let snapshot = FormSnapshot::new()
            .with("name", " ")
            .with("currentIssues", "紙の申請")
            .with(
                "priority",
                vec!["業務効率化".to_string(), "データ活用".to_string()],
            );
        let payload = SubmissionPayload::build(&schema, &snapshot, sent_at());

        assert_eq!(payload.get("name"), Some("匿名"));
        assert_eq!(payload.get("timeline"), Some("未定"));
        assert_eq!(payload.get("budget"), Some("未定"));
        assert_eq!(payload.get("priority"), Some("業務効率化,データ活用"));
        assert_eq!(payload.get("freeComment"), Some(""));
        assert_eq!(payload.get("timestamp"), Some("2025/01/15 10:30:00"));
    }

    #[test]
    fn test_pairs_follow_declaration_order() {
        let schema = FormSchema::quick_hearing();
        let snapshot = FormSnapshot::new()
            .with("freeComment", "c")
            .with("currentIssues", "b")
            .with("name", "a");
        let payload = SubmissionPayload::build(&schema, &snapshot, sent_at());

        let names: Vec<_> = payload.pairs().map(|(n, _)| n).collect();
        assert_eq!(names, ["name", "currentIssues", "freeComment", "timestamp"]);
    }

    #[test]
    fn test_undeclared_fields_are_kept() {
        let schema = FormSchema::quick_hearing();
        let snapshot = FormSnapshot::new().with("extra", "kept");
        let payload = SubmissionPayload::build(&schema, &snapshot, sent_at());
        assert_eq!(payload.get("extra"), Some("kept"));
    }

    #[test]
    fn test_form_body_encoding() {
        let schema = FormSchema::quick_hearing();
        let snapshot = FormSnapshot::new()
            .with("name", "Taro Yamada")
            .with("currentIssues", "a&b=c");
        let body = SubmissionPayload::build(&schema, &snapshot, sent_at()).to_form_body();

        assert_eq!(
            body,
            "name=Taro+Yamada&currentIssues=a%26b%3Dc&freeComment=&timestamp=2025%2F01%2F15+10%3A30%3A00"
        );
    }
}
