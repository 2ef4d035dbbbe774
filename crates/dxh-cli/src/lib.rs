//! CLI library components for the DX hearing sheet.

pub mod app;
pub mod logging;
pub mod settings;
