//! Endpoint configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default soft timeout for one submission.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How the payload is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMethod {
    /// POST with an `application/x-www-form-urlencoded` body.
    #[default]
    Post,
    /// GET with the payload as query parameters.
    Get,
}

impl SubmitMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
        }
    }
}

impl fmt::Display for SubmitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the endpoint's reply is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Fire-and-forget: the reply is ignored, status included.
    #[default]
    Opaque,
    /// The reply is parsed as `{"success": bool, "message": ..., "rowNumber": ...}`.
    Readable,
}

/// Where and how submissions are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// Endpoint URL. Empty disables remote submission.
    pub url: String,
    pub method: SubmitMethod,
    pub response: ResponseMode,
    /// Soft timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: SubmitMethod::default(),
            response: ResponseMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EndpointSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: SubmitMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_response(mut self, response: ResponseMode) -> Self {
        self.response = response;
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Whether an endpoint is configured at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EndpointSettings::default();
        assert!(!settings.is_configured());
        assert_eq!(settings.method, SubmitMethod::Post);
        assert_eq!(settings.response, ResponseMode::Opaque);
        assert_eq!(settings.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let settings = EndpointSettings::new("http://x").with_timeout_secs(0);
        assert_eq!(settings.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_blank_url_is_not_configured() {
        assert!(!EndpointSettings::new("   ").is_configured());
    }
}
