//! Submission checks for hearing sheets.
//!
//! Validation runs once per submit attempt against the snapshot collected at
//! that moment. It never mutates anything and never fails: an absent field
//! is reported missing like a blank one.

mod issue;
mod validator;

pub use issue::Issue;
pub use validator::{ValidationReport, validate};
