//! The single autosaved draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dxh_model::FormSnapshot;

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;

/// Key the draft is stored under unless configured otherwise.
pub const DEFAULT_DRAFT_KEY: &str = "dxHearingDraft";

/// Serialized form of the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// When the draft was written.
    pub saved_at: DateTime<Utc>,
    /// Field values at that time.
    pub fields: FormSnapshot,
}

/// Owns the draft key and the store it lives in.
///
/// At most one draft exists: each save replaces the previous one.
#[derive(Debug, Clone)]
pub struct DraftStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_DRAFT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Autosave: replace the draft, logging instead of failing.
    ///
    /// Returns whether the draft was written.
    pub fn save_draft(&self, snapshot: &FormSnapshot) -> bool {
        match self.try_save_draft(snapshot) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    %error,
                    "draft autosave skipped: {}",
                    error.user_message()
                );
                false
            }
        }
    }

    /// Replace the draft, reporting failures.
    pub fn try_save_draft(&self, snapshot: &FormSnapshot) -> Result<()> {
        let record = DraftRecord {
            saved_at: Utc::now(),
            fields: snapshot.clone(),
        };
        let json = serde_json::to_string(&record)
            .map_err(|source| StorageError::Serialization { source })?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, fields = snapshot.len(), "draft saved");
        Ok(())
    }

    /// Load the draft's field values.
    ///
    /// Absent, unreadable, and corrupt drafts all come back as `None`.
    pub fn load_draft(&self) -> Option<FormSnapshot> {
        match self.load_record() {
            Ok(record) => record.map(|r| r.fields),
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    %error,
                    "ignoring stored draft: {}",
                    error.user_message()
                );
                None
            }
        }
    }

    /// Load the full record, distinguishing absent from corrupt.
    pub fn load_record(&self) -> Result<Option<DraftRecord>> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let record = serde_json::from_str(&json)
            .map_err(|source| StorageError::Deserialization { source })?;
        Ok(Some(record))
    }

    /// Delete the draft. Failures are logged.
    pub fn clear_draft(&self) -> bool {
        match self.try_clear_draft() {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "could not clear draft");
                false
            }
        }
    }

    pub fn try_clear_draft(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        tracing::debug!(key = %self.key, "draft cleared");
        Ok(())
    }

    pub fn has_draft(&self) -> bool {
        self.load_draft().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample() -> FormSnapshot {
        FormSnapshot::new()
            .with("name", "Taro")
            .with("currentIssues", "report automation")
            .with(
                "priority",
                vec!["データ活用".to_string(), "業務効率化".to_string()],
            )
    }

    #[test]
    fn test_save_then_load() {
        let drafts = DraftStore::new(MemoryStore::new());
        assert!(drafts.save_draft(&sample()));
        assert_eq!(drafts.load_draft(), Some(sample()));
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::new();
        let drafts = DraftStore::new(store.clone());
        drafts.save_draft(&sample());
        drafts.save_draft(&FormSnapshot::new().with("name", "Hanako"));

        assert_eq!(store.len(), 1);
        assert_eq!(
            drafts.load_draft(),
            Some(FormSnapshot::new().with("name", "Hanako"))
        );
    }

    #[test]
    fn test_absent_draft_is_none() {
        let drafts = DraftStore::new(MemoryStore::new());
        assert_eq!(drafts.load_draft(), None);
        assert!(!drafts.has_draft());
    }

    #[test]
    fn test_corrupt_draft_is_none() {
        let store = MemoryStore::new();
        store.set(DEFAULT_DRAFT_KEY, "{not json").unwrap();
        let drafts = DraftStore::new(store);

        assert_eq!(drafts.load_draft(), None);
        assert!(matches!(
            drafts.load_record(),
            Err(StorageError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_quota_failure_is_silent() {
        let drafts = DraftStore::new(MemoryStore::with_quota(8));
        assert!(!drafts.save_draft(&sample()));
        assert_eq!(drafts.load_draft(), None);
    }

    #[test]
    fn test_clear_draft() {
        let drafts = DraftStore::with_key(MemoryStore::new(), "custom");
        drafts.save_draft(&sample());
        assert!(drafts.clear_draft());
        assert_eq!(drafts.load_draft(), None);
        // Clearing twice is fine.
        assert!(drafts.clear_draft());
    }
}
