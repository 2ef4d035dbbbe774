//! HTTP transport behind the submitter.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::config::{ResponseMode, SubmitMethod};
use crate::error::{Result, SubmitError};

/// User agent string for submissions.
const USER_AGENT_VALUE: &str = concat!("dx-hearing/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One request, fully encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub method: SubmitMethod,
    /// Target URL, including the query for GET requests.
    pub url: Url,
    /// Form body for POST requests.
    pub body: Option<String>,
}

/// Reply read in [`ResponseMode::Readable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends encoded requests.
///
/// Returns `Ok(None)` when the request left but the reply was not read
/// (opaque mode).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(
        &self,
        request: DispatchRequest,
        mode: ResponseMode,
    ) -> Result<Option<RawResponse>>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(
        &self,
        request: DispatchRequest,
        mode: ResponseMode,
    ) -> Result<Option<RawResponse>> {
        let builder = match request.method {
            SubmitMethod::Post => self
                .client
                .post(request.url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(request.body.unwrap_or_default()),
            SubmitMethod::Get => self.client.get(request.url),
        };

        let response = builder.send().await?;

        match mode {
            ResponseMode::Opaque => {
                tracing::debug!("request dispatched; response not inspected");
                Ok(None)
            }
            ResponseMode::Readable => {
                let status = response.status().as_u16();
                let body = response.text().await?;
                Ok(Some(RawResponse { status, body }))
            }
        }
    }
}
