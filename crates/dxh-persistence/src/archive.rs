//! Local history of submitted sheets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dxh_model::FormSnapshot;

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;

/// Key the archive is stored under unless configured otherwise.
pub const DEFAULT_ARCHIVE_KEY: &str = "dxHearingData";

/// One submitted sheet as it was at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedSubmission {
    pub submitted_at: DateTime<Utc>,
    pub fields: FormSnapshot,
}

/// Append-only list of every sheet passed to the submitter, kept whether or
/// not the remote endpoint accepted it.
#[derive(Debug, Clone)]
pub struct SubmissionArchive<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SubmissionArchive<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_ARCHIVE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Record a submission, logging instead of failing.
    pub fn append(&self, snapshot: &FormSnapshot, submitted_at: DateTime<Utc>) -> bool {
        match self.try_append(snapshot, submitted_at) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "submission not archived");
                false
            }
        }
    }

    pub fn try_append(&self, snapshot: &FormSnapshot, submitted_at: DateTime<Utc>) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(ArchivedSubmission {
            submitted_at,
            fields: snapshot.clone(),
        });
        let json = serde_json::to_string(&entries)
            .map_err(|source| StorageError::Serialization { source })?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = entries.len(), "submission archived");
        Ok(())
    }

    /// All archived submissions, oldest first.
    pub fn entries(&self) -> Result<Vec<ArchivedSubmission>> {
        match self.store.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json)
                .map_err(|source| StorageError::Deserialization { source }),
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_append_keeps_order() {
        let archive = SubmissionArchive::new(MemoryStore::new());
        let first = Utc.with_ymd_and_hms(2025, 1, 15, 1, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 1, 16, 1, 0, 0).unwrap();

        assert!(archive.append(&FormSnapshot::new().with("name", "Taro"), first));
        assert!(archive.append(&FormSnapshot::new().with("name", "Hanako"), second));

        let entries = archive.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].fields.text("name"), Some("Taro"));
        assert_eq!(entries[1].submitted_at, second);
    }

    #[test]
    fn test_corrupt_archive_blocks_append() {
        let store = MemoryStore::new();
        store.set(DEFAULT_ARCHIVE_KEY, "[{").unwrap();
        let archive = SubmissionArchive::new(store.clone());

        assert!(!archive.append(&FormSnapshot::new(), Utc::now()));
        assert_eq!(store.get(DEFAULT_ARCHIVE_KEY).unwrap().as_deref(), Some("[{"));
    }

    #[test]
    fn test_shares_store_with_drafts() {
        let store = MemoryStore::new();
        let drafts = crate::DraftStore::new(store.clone());
        let archive = SubmissionArchive::new(store.clone());

        drafts.save_draft(&FormSnapshot::new().with("name", "Taro"));
        archive.append(&FormSnapshot::new().with("name", "Taro"), Utc::now());
        drafts.clear_draft();

        assert_eq!(store.len(), 1);
        assert_eq!(archive.entries().unwrap().len(), 1);
    }
}
