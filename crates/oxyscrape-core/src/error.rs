use std::time::Duration;

use thiserror::Error;

/// Error taxonomy surfaced by every oxyscrape call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrapeError {
    /// Caller-side mistake caught before any HTTP traffic.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A single request exceeded `request_timeout`, or the poll phase
    /// exceeded `job_completion_timeout`.
    #[error("Timed out after {after:?}{}", job_suffix(.job_id))]
    Timeout {
        after: Duration,
        /// Set when a job was already submitted, so the caller may resume it.
        job_id: Option<String>,
    },

    /// The service rejected the request (HTTP 400, 401, 403 or 422).
    #[error("Client error (HTTP {status}): {message}")]
    ClientError { status: u16, message: String },

    /// The job reached a faulted terminal state.
    #[error("Service error: {message}{}", job_suffix(.job_id))]
    ServiceError {
        message: String,
        job_id: Option<String>,
    },

    /// Retryable transport condition (408, 429, 5xx or a dropped connection).
    #[error("Transient error{}: {message}", status_suffix(.status))]
    TransientError { status: Option<u16>, message: String },

    /// Status poll answered 404; the job is not visible yet.
    #[error("Job not ready: {0}")]
    JobNotReady(String),

    /// Malformed response: non-JSON body, missing fields, unexpected status.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Caller-initiated cancellation.
    #[error("Cancelled")]
    Cancelled,
}

fn job_suffix(job_id: &Option<String>) -> String {
    match job_id {
        Some(id) => format!(" (job {id})"),
        None => String::new(),
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

impl ScrapeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ScrapeError::InvalidArgument(message.into())
    }

    /// Returns true if the async job driver may keep polling after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScrapeError::TransientError { .. }
                | ScrapeError::JobNotReady(_)
                | ScrapeError::Timeout { job_id: None, .. }
        )
    }

    /// HTTP status attached to the error, if the service sent one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScrapeError::ClientError { status, .. } => Some(*status),
            ScrapeError::TransientError { status, .. } => *status,
            _ => None,
        }
    }

    /// Job id carried by a partially completed async call.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            ScrapeError::Timeout { job_id, .. } | ScrapeError::ServiceError { job_id, .. } => {
                job_id.as_deref()
            }
            _ => None,
        }
    }

    /// Attach a job id to a timeout that lacks one.
    pub(crate) fn with_job_id(self, id: &str) -> Self {
        match self {
            ScrapeError::Timeout {
                after,
                job_id: None,
            } => ScrapeError::Timeout {
                after,
                job_id: Some(id.to_string()),
            },
            other => other,
        }
    }
}
