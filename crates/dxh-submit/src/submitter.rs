//! The remote submitter.

use serde::Deserialize;
use url::Url;

use crate::ack::Acknowledgement;
use crate::config::{EndpointSettings, ResponseMode, SubmitMethod};
use crate::error::{Result, SubmitError};
use crate::payload::SubmissionPayload;
use crate::transport::{DispatchRequest, RawResponse, ReqwestTransport, Transport};

/// Reply shape of the spreadsheet web app.
#[derive(Debug, Deserialize)]
struct EndpointReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "rowNumber")]
    row_number: Option<u64>,
}

/// Sends payloads to the configured endpoint.
///
/// One call is one attempt: nothing is retried, and the payload is not kept.
#[derive(Debug, Clone)]
pub struct RemoteSubmitter<T = ReqwestTransport> {
    settings: EndpointSettings,
    transport: T,
}

impl RemoteSubmitter<ReqwestTransport> {
    /// Create a submitter backed by an HTTP client using the configured timeout.
    pub fn new(settings: EndpointSettings) -> Result<Self> {
        let transport = ReqwestTransport::new(settings.timeout())?;
        Ok(Self {
            settings,
            transport,
        })
    }
}

impl<T: Transport> RemoteSubmitter<T> {
    pub fn with_transport(settings: EndpointSettings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &EndpointSettings {
        &self.settings
    }

    /// Submit one payload.
    ///
    /// With no endpoint configured this resolves to
    /// [`Acknowledgement::Skipped`] without any I/O. Otherwise the request is
    /// dispatched and, unless the reply is readable, reported as
    /// [`Acknowledgement::Dispatched`].
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<Acknowledgement> {
        if !self.settings.is_configured() {
            tracing::warn!("no endpoint configured; remote submission skipped");
            return Ok(Acknowledgement::Skipped);
        }

        let request = self.encode(payload)?;
        let timeout = self.settings.timeout();
        tracing::info!(
            method = %request.method,
            host = request.url.host_str().unwrap_or_default(),
            params = payload.pairs().count(),
            "submitting hearing sheet"
        );

        let reply = tokio::time::timeout(
            timeout,
            self.transport.dispatch(request, self.settings.response),
        )
        .await
        .map_err(|_| SubmitError::Timeout(timeout))??;

        let ack = match reply {
            None => Acknowledgement::Dispatched,
            Some(raw) => interpret_reply(&raw)?,
        };
        tracing::info!(%ack, "submission resolved");
        Ok(ack)
    }

    /// Encode the payload for the configured method.
    pub fn encode(&self, payload: &SubmissionPayload) -> Result<DispatchRequest> {
        let url = self.endpoint_url()?;
        let request = match self.settings.method {
            SubmitMethod::Post => DispatchRequest {
                method: SubmitMethod::Post,
                url,
                body: Some(payload.to_form_body()),
            },
            SubmitMethod::Get => {
                let mut url = url;
                url.query_pairs_mut().extend_pairs(payload.pairs());
                DispatchRequest {
                    method: SubmitMethod::Get,
                    url,
                    body: None,
                }
            }
        };
        Ok(request)
    }

    fn endpoint_url(&self) -> Result<Url> {
        let raw = self.settings.url.trim();
        let url = Url::parse(raw).map_err(|e| SubmitError::InvalidEndpoint {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SubmitError::InvalidEndpoint {
                url: raw.to_string(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(url)
    }
}

fn interpret_reply(raw: &RawResponse) -> Result<Acknowledgement> {
    let success_status = (200..300).contains(&raw.status);
    match serde_json::from_str::<EndpointReply>(&raw.body) {
        Ok(reply) if success_status && reply.success => Ok(Acknowledgement::Confirmed {
            row: reply.row_number,
        }),
        Ok(reply) => Err(SubmitError::Rejected {
            status: (!success_status).then_some(raw.status),
            message: reply
                .message
                .unwrap_or_else(|| "endpoint reported failure".to_string()),
        }),
        Err(_) if !success_status => Err(SubmitError::Rejected {
            status: Some(raw.status),
            message: truncate(&raw.body, 200),
        }),
        Err(e) => Err(SubmitError::Response(e.to_string())),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use dxh_model::{FormSchema, FormSnapshot};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records requests and answers with a canned result.
    struct FakeTransport {
        reply: Mutex<Option<Result<Option<RawResponse>>>>,
        seen: Mutex<Vec<DispatchRequest>>,
        delay: Option<Duration>,
    }

    impl FakeTransport {
        fn answering(reply: Result<Option<RawResponse>>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
                delay: None,
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn dispatch(
            &self,
            request: DispatchRequest,
            _mode: ResponseMode,
        ) -> Result<Option<RawResponse>> {
            self.seen.lock().unwrap().push(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.lock().unwrap().take().unwrap_or(Ok(None))
        }
    }

    fn payload() -> SubmissionPayload {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let snapshot = FormSnapshot::new()
            .with("name", "Taro")
            .with("currentIssues", "report automation");
        SubmissionPayload::build(&FormSchema::quick_hearing(), &snapshot, at)
    }

    fn readable(status: u16, body: &str) -> Result<Option<RawResponse>> {
        Ok(Some(RawResponse {
            status,
            body: body.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_is_skipped() {
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::default(),
            FakeTransport::answering(Ok(None)),
        );
        let ack = submitter.submit(&payload()).await.unwrap();
        assert_eq!(ack, Acknowledgement::Skipped);
        assert!(submitter.transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_opaque_dispatch_is_not_confirmed() {
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::new("https://example.com/exec"),
            FakeTransport::answering(Ok(None)),
        );
        let ack = submitter.submit(&payload()).await.unwrap();
        assert_eq!(ack, Acknowledgement::Dispatched);
        assert!(!ack.is_confirmed());

        let seen = submitter.transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, SubmitMethod::Post);
        assert!(seen[0].body.as_deref().unwrap().contains("name=Taro"));
    }

    #[tokio::test]
    async fn test_transport_error_is_returned_once() {
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::new("https://example.com/exec"),
            FakeTransport::answering(Err(SubmitError::Network("refused".to_string()))),
        );
        let result = submitter.submit(&payload()).await;
        assert!(matches!(result, Err(SubmitError::Network(_))));
        assert_eq!(submitter.transport.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_soft_timeout() {
        let mut transport = FakeTransport::answering(Ok(None));
        transport.delay = Some(Duration::from_secs(60));
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::new("https://example.com/exec").with_timeout_secs(10),
            transport,
        );
        let result = submitter.submit(&payload()).await;
        assert!(matches!(result, Err(SubmitError::Timeout(d)) if d == Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn test_readable_reply_confirms_row() {
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::new("https://example.com/exec").with_response(ResponseMode::Readable),
            FakeTransport::answering(readable(
                200,
                r#"{"success":true,"message":"ok","rowNumber":42}"#,
            )),
        );
        let ack = submitter.submit(&payload()).await.unwrap();
        assert_eq!(ack, Acknowledgement::Confirmed { row: Some(42) });
    }

    #[test]
    fn test_interpret_reply_failures() {
        let rejected = interpret_reply(&RawResponse {
            status: 200,
            body: r#"{"success":false,"message":"sheet missing"}"#.to_string(),
        });
        assert!(matches!(
            rejected,
            Err(SubmitError::Rejected { status: None, ref message }) if message == "sheet missing"
        ));

        let server_error = interpret_reply(&RawResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        });
        assert!(matches!(
            server_error,
            Err(SubmitError::Rejected {
                status: Some(502),
                ..
            })
        ));

        let garbage = interpret_reply(&RawResponse {
            status: 200,
            body: "not json".to_string(),
        });
        assert!(matches!(garbage, Err(SubmitError::Response(_))));
    }

    #[test]
    fn test_get_encodes_query() {
        let submitter = RemoteSubmitter::with_transport(
            EndpointSettings::new("https://example.com/exec?sheet=1")
                .with_method(SubmitMethod::Get),
            FakeTransport::answering(Ok(None)),
        );
        let request = submitter.encode(&payload()).unwrap();
        assert_eq!(request.body, None);
        let query = request.url.query().unwrap();
        assert!(query.starts_with("sheet=1&name=Taro&currentIssues=report+automation"));
        assert!(query.ends_with("timestamp=2025%2F01%2F15+09%3A00%3A00"));
    }

    #[test]
    fn test_invalid_endpoint() {
        for url in ["not a url", "ftp://example.com/file"] {
            let submitter = RemoteSubmitter::with_transport(
                EndpointSettings::new(url),
                FakeTransport::answering(Ok(None)),
            );
            assert!(matches!(
                submitter.encode(&payload()),
                Err(SubmitError::InvalidEndpoint { .. })
            ));
        }
    }
}
