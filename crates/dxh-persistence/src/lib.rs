//! Durable draft storage for hearing sheets.
//!
//! Every input event autosaves the collected form under one fixed key, so
//! an interrupted session can pick up where it left off. The draft is
//! deleted only after a submission is acknowledged.
//!
//! # Storage
//!
//! Drafts go through the [`KeyValueStore`] trait:
//!
//! - [`FileStore`] keeps one `<key>.json` file per key in a directory and
//!   writes atomically (temp file + rename)
//! - [`MemoryStore`] keeps values in memory; clones share state, and an
//!   optional byte quota simulates a full store
//!
//! # Record format
//!
//! ```text
//! {
//!   "saved_at": "2025-01-15T01:30:00Z",
//!   "fields": { "name": "Taro", "priority": ["データ活用"] }
//! }
//! ```
//!
//! Multi-select values are JSON arrays, so a draft loads back exactly as it
//! was saved, list order included.
//!
//! Submitted sheets are also appended to a [`SubmissionArchive`] in the same
//! store, independent of the draft.

mod archive;
mod draft;
mod error;
mod store;

pub use archive::{ArchivedSubmission, DEFAULT_ARCHIVE_KEY, SubmissionArchive};
pub use draft::{DEFAULT_DRAFT_KEY, DraftRecord, DraftStore};
pub use error::{Result, StorageError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
