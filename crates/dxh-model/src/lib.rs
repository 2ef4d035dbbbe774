//! Core types for the DX hearing sheet.
//!
//! The hearing sheet is a survey about day-to-day pain points. This crate
//! holds everything that does not touch storage or the network:
//!
//! - [`schema`]: field declarations ([`FormSchema`], [`FieldSpec`]) and the
//!   built-in sheets
//! - [`document`]: the in-memory form ([`FormDocument`]) that input events
//!   mutate and the field collector reads
//! - [`snapshot`]: [`FormSnapshot`] and [`FieldValue`], the collected values
//! - [`progress`]: completion percentage for live feedback
//!
//! # Example
//!
//! ```
//! use dxh_model::{FormDocument, FormSchema, estimate_progress};
//!
//! let schema = FormSchema::quick_hearing();
//! let mut document = FormDocument::from_schema(&schema);
//! document.set_text("currentIssues", "monthly report takes two days").unwrap();
//!
//! let snapshot = document.collect();
//! assert_eq!(snapshot.text("currentIssues"), Some("monthly report takes two days"));
//! assert_eq!(estimate_progress(&snapshot, schema.progress_total()), 33);
//! ```

pub mod document;
pub mod error;
pub mod progress;
pub mod schema;
pub mod snapshot;

pub use document::{Control, ControlState, FormDocument};
pub use error::{DocumentError, SchemaError};
pub use progress::{estimate_progress, progress_label};
pub use schema::{FieldKind, FieldSpec, FormSchema};
pub use snapshot::{FieldValue, FormSnapshot};
