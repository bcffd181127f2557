//! The HTTP seam: one authenticated request in, one classified outcome out.
//!
//! [`Transport`] implementations only move bytes and map network failures;
//! [`send`] applies the status-code policy shared by every driver.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::payload::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// What a request is for. Only affects status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Realtime or async submission (POST).
    Submit,
    /// Job status poll (GET). A 404 here means "not ready yet".
    Poll,
    /// Job result fetch (GET).
    Fetch,
}

impl RequestKind {
    pub fn method(&self) -> HttpMethod {
        match self {
            RequestKind::Submit => HttpMethod::Post,
            RequestKind::Poll | RequestKind::Fetch => HttpMethod::Get,
        }
    }
}

/// A single outbound request.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    pub method: HttpMethod,
    pub url: &'a str,
    /// JSON body; only sent with POST.
    pub body: Option<&'a Payload>,
    pub timeout: Duration,
    pub credentials: &'a Credentials,
}

/// Raw status and body as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }
}

/// Executes one authenticated HTTP exchange.
///
/// Implementations must send `Authorization` (Basic), `Content-Type:
/// application/json` on POST, and a library `User-Agent`; bound the exchange
/// by `request.timeout` and report expiry as [`ScrapeError::Timeout`];
/// report dropped connections as [`ScrapeError::TransientError`].
/// Retries are never done here.
pub trait Transport: Send + Sync + Clone {
    fn execute(
        &self,
        request: HttpRequest<'_>,
    ) -> impl Future<Output = Result<HttpReply, ScrapeError>> + Send;
}

/// Execute a request and classify the reply.
///
/// The exchange is bounded by `timeout` even if the transport overruns it,
/// and abandoned as soon as `cancel` fires.
pub async fn send<T: Transport>(
    transport: &T,
    kind: RequestKind,
    url: &str,
    body: Option<&Payload>,
    timeout: Duration,
    credentials: &Credentials,
    cancel: &CancellationToken,
) -> Result<Value, ScrapeError> {
    let method = kind.method();
    let request = HttpRequest {
        method,
        url,
        body: if method == HttpMethod::Post { body } else { None },
        timeout,
        credentials,
    };

    tracing::debug!(%method, %url, "sending request");
    let reply = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(ScrapeError::Cancelled),
        result = tokio::time::timeout(timeout, transport.execute(request)) => {
            result.unwrap_or(Err(ScrapeError::Timeout { after: timeout, job_id: None }))?
        }
    };
    tracing::debug!(%method, %url, status = reply.status, "received response");

    classify(kind, reply)
}

/// Map a raw reply to a decoded body or a classified error.
///
/// - 2xx: body decoded as JSON, else `ProtocolError`
/// - 400, 401, 403, 422: `ClientError`
/// - 404 on a status poll: `JobNotReady`
/// - 408, 429, 5xx: `TransientError`
/// - anything else: `ProtocolError`
pub fn classify(kind: RequestKind, reply: HttpReply) -> Result<Value, ScrapeError> {
    let HttpReply { status, body } = reply;

    match status {
        200..=299 => serde_json::from_str(&body).map_err(|e| {
            ScrapeError::ProtocolError(format!("Response body is not valid JSON: {e}"))
        }),
        400 | 401 | 403 | 422 => Err(ScrapeError::ClientError {
            status,
            message: error_message(status, &body),
        }),
        404 if kind == RequestKind::Poll => Err(ScrapeError::JobNotReady(error_message(
            status, &body,
        ))),
        408 | 429 | 500..=599 => Err(ScrapeError::TransientError {
            status: Some(status),
            message: error_message(status, &body),
        }),
        _ => Err(ScrapeError::ProtocolError(format!(
            "Unexpected HTTP {status}: {}",
            error_message(status, &body)
        ))),
    }
}

/// Pull the service's diagnostic out of an error body.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        })
}
