//! Request executor that posts `batchGet` calls over HTTPS.
//!
//! Credential acquisition happens elsewhere; this executor only attaches a
//! bearer token it is handed.

use super::{BatchGetResponse, ReportRequest, RequestExecutor, TransportError};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Public endpoint of the reporting API.
pub const DEFAULT_ENDPOINT: &str = "https://analyticsreporting.googleapis.com/v4/reports:batchGet";

const LOG_TARGET: &str = "      http";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetBody<'a> {
    report_requests: [&'a ReportRequest; 1],
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,

    #[serde(default)]
    status: Option<String>,

    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpExecutor {
    /// Create an executor posting to `endpoint`, authenticating with `token` when given.
    ///
    /// The client has no timeout of its own; the fetcher bounds every request.
    pub fn new(token: Option<&str>, endpoint: impl Into<String>) -> crate::Result<Self> {
        let mut client_builder = reqwest::Client::builder().user_agent("easy-gar");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &ReportRequest) -> Result<BatchGetResponse, TransportError> {
        let body = BatchGetBody {
            report_requests: [request],
        };

        log::debug!(target: LOG_TARGET, "POST {}", self.endpoint);

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(&e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::transient("connectionError", e.to_string()).with_status(status.as_u16()))?;

        if !status.is_success() {
            return Err(classify_error_body(status, &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| TransportError::new("invalidResponse", format!("could not decode response: {e}")).with_status(status.as_u16()))
    }
}

impl RequestExecutor for HttpExecutor {
    fn execute(&self, request: &ReportRequest) -> impl Future<Output = Result<BatchGetResponse, TransportError>> + Send {
        self.post(request)
    }
}

fn classify_send_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::transient(super::error::TIMEOUT_REASON, e.to_string())
    } else if e.is_connect() || e.is_request() {
        TransportError::transient("connectionError", e.to_string())
    } else {
        TransportError::new("requestFailed", e.to_string())
    }
}

/// Turn a non-success response into a transport error.
///
/// The first `errors[].reason` wins, then the canonical `status`; bodies that
/// carry neither are classified by HTTP status alone.
fn classify_error_body(status: StatusCode, text: &str) -> TransportError {
    let code = status.as_u16();

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(text) {
        let reason = envelope
            .error
            .errors
            .iter()
            .find_map(|d| d.reason.clone())
            .or(envelope.error.status);

        if let Some(reason) = reason {
            let error = TransportError::new(reason, envelope.error.message).with_status(code);
            return if status.is_server_error() && !error.is_retryable() {
                TransportError::transient(error.reason_code(), error.message()).with_status(code)
            } else {
                error
            };
        }
    }

    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        text.to_string()
    };

    let reason = match status {
        StatusCode::TOO_MANY_REQUESTS => "userRateLimitExceeded",
        StatusCode::INTERNAL_SERVER_ERROR => "internalServerError",
        s if s.is_server_error() => "backendError",
        StatusCode::BAD_REQUEST => "badRequest",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "notFound",
        _ => "httpError",
    };

    TransportError::new(reason, message).with_status(code)
}
