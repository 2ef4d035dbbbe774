//! Transcript export for hearing sheets.
//!
//! A transcript is a human-readable rendering of one snapshot. It is saved
//! after every acknowledged submission, as a fallback when submission
//! fails, and on demand.
//!
//! Rendering ([`render`]) is pure; writing goes through an [`ArtifactSink`]
//! so the flow can be tested without touching the filesystem.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dxh_export::{MemorySink, TranscriptExporter, TranscriptOptions};
//! use dxh_model::{FormSchema, FormSnapshot};
//!
//! let sink = MemorySink::new();
//! let exporter = TranscriptExporter::new(TranscriptOptions::default(), sink.clone());
//!
//! let at = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
//! let snapshot = FormSnapshot::new().with("currentIssues", "manual reports");
//! let exported = exporter
//!     .export(&FormSchema::quick_hearing(), &snapshot, at)
//!     .unwrap();
//!
//! assert_eq!(exported.file_name, "DXヒアリング_2025_01_15_10_30_00.md");
//! assert!(exported.content.contains("manual reports"));
//! assert_eq!(sink.len(), 1);
//! ```

mod error;
mod exporter;
mod options;
mod render;
mod sink;

pub use error::{ExportError, Result};
pub use exporter::{ExportedTranscript, TranscriptExporter};
pub use options::{
    DEFAULT_PLACEHOLDER, DEFAULT_PREFIX, LIST_SEPARATOR, TranscriptFormat, TranscriptOptions,
};
pub use render::{render, sanitize_file_name, transcript_file_name};
pub use sink::{ArtifactSink, DirectorySink, MemorySink};
