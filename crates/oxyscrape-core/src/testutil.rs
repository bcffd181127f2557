//! Scripted transport and recording reporter for driver tests.
//!
//! Clones share state through `Arc<Mutex<_>>`, so a test keeps one handle
//! for assertions and gives the other to the driver.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::error::ScrapeError;
use crate::job_driver::{JobEvent, JobReporter};
use crate::transport::{HttpMethod, HttpReply, HttpRequest, Transport};

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// A request as seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub timeout: Duration,
    pub authorization: String,
}

type Scripted = (Duration, Result<HttpReply, ScrapeError>);

/// Mock transport that replays scripted replies in order.
#[derive(Clone)]
pub struct MockTransport {
    /// Queue of replies. Each call pops the first element.
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    /// Returned once the queue is empty.
    fallback: Arc<Mutex<HttpReply>>,
    /// Added to every reply.
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new(replies: Vec<Result<HttpReply, ScrapeError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|r| (Duration::ZERO, r)).collect(),
            )),
            fallback: Arc::new(Mutex::new(HttpReply::new(200, r#"{"results":[]}"#))),
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delay every reply by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reply to use once the scripted queue is exhausted.
    pub fn with_fallback(self, reply: HttpReply) -> Self {
        *self.fallback.lock().unwrap() = reply;
        self
    }

    /// Append a reply that arrives only after `delay`.
    pub fn then_after(self, delay: Duration, reply: Result<HttpReply, ScrapeError>) -> Self {
        self.replies.lock().unwrap().push_back((delay, reply));
        self
    }

    /// All requests executed so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs of all requests executed so far, in order.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest<'_>) -> Result<HttpReply, ScrapeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.to_string(),
            body: request.body.map(|p| p.clone().into_value()),
            timeout: request.timeout,
            authorization: request.credentials.authorization_header(),
        });

        let next = self.replies.lock().unwrap().pop_front();
        let (extra, reply) = match next {
            Some(scripted) => scripted,
            None => (Duration::ZERO, Ok(self.fallback.lock().unwrap().clone())),
        };

        let wait = self.delay + extra;
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        reply
    }
}

// ---------------------------------------------------------------------------
// RecordingReporter
// ---------------------------------------------------------------------------

/// Reporter that records a short tag per event, e.g. `polled:pending`.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl JobReporter for RecordingReporter {
    fn report(&self, event: JobEvent<'_>) {
        let tag = match event {
            JobEvent::Submitted { job_id, .. } => format!("submitted:{job_id}"),
            JobEvent::Polled { status, .. } => format!("polled:{status}"),
            JobEvent::PollRetry { .. } => "poll_retry".to_string(),
            JobEvent::Done { .. } => "done".to_string(),
            JobEvent::Fetched { results, .. } => format!("fetched:{results}"),
            JobEvent::Faulted { .. } => "faulted".to_string(),
            JobEvent::TimedOut { polls, .. } => format!("timed_out:{polls}"),
            JobEvent::Cancelled { .. } => "cancelled".to_string(),
        };
        self.events.lock().unwrap().push(tag);
    }
}
