//! Remote submission of hearing sheets.
//!
//! The reference endpoint is a spreadsheet web app that appends one row per
//! request. It is reached cross-origin in fire-and-forget fashion, so by
//! default the response is never read: a request that leaves without a
//! transport error is reported as [`Acknowledgement::Dispatched`], which
//! says nothing about whether a row was written. Endpoints that do return a
//! readable reply can be configured with [`ResponseMode::Readable`], which
//! upgrades the result to [`Acknowledgement::Confirmed`].
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use dxh_model::{FormSchema, FormSnapshot};
//! use dxh_submit::{EndpointSettings, RemoteSubmitter, SubmissionPayload};
//!
//! async fn send() -> dxh_submit::Result<()> {
//!     let settings = EndpointSettings::new("https://script.google.com/macros/s/ID/exec");
//!     let submitter = RemoteSubmitter::new(settings)?;
//!
//!     let schema = FormSchema::quick_hearing();
//!     let snapshot = FormSnapshot::new().with("currentIssues", "manual reports");
//!     let payload = SubmissionPayload::build(&schema, &snapshot, Local::now().naive_local());
//!
//!     let ack = submitter.submit(&payload).await?;
//!     println!("{ack}");
//!     Ok(())
//! }
//! ```

pub mod ack;
pub mod config;
pub mod error;
pub mod payload;
pub mod submitter;
pub mod transport;

pub use ack::Acknowledgement;
pub use config::{EndpointSettings, ResponseMode, SubmitMethod};
pub use error::{Result, SubmitError};
pub use payload::{LIST_DELIMITER, SubmissionPayload};
pub use submitter::RemoteSubmitter;
pub use transport::{DispatchRequest, RawResponse, ReqwestTransport, Transport};
