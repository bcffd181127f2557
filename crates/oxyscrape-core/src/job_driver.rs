//! Submit → poll → fetch state machine for async jobs.
//!
//! ```text
//!         submit                poll            fetch
//! start ─────────▶ pending ──loop──▶ done ─────────▶ finished
//!                    │  │
//!                    │  └─ deadline ──▶ Timeout
//!                    └─ faulted ──▶ ServiceError
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::job::{Job, JobStatus};
use crate::payload::Payload;
use crate::response::Response;
use crate::transport::{self, RequestKind, Transport};

pub const DEFAULT_ASYNC_URL: &str = "https://data.oxylabs.io/v1/queries";

/// Events emitted by the job driver for monitoring/logging.
#[derive(Debug, Clone)]
pub enum JobEvent<'a> {
    Submitted {
        job_id: &'a str,
        source: &'a str,
    },
    Polled {
        job_id: &'a str,
        attempt: u32,
        status: JobStatus,
    },
    PollRetry {
        job_id: &'a str,
        attempt: u32,
        error: &'a ScrapeError,
    },
    Done {
        job_id: &'a str,
        elapsed: Duration,
    },
    Fetched {
        job_id: &'a str,
        results: usize,
    },
    Faulted {
        job_id: &'a str,
        message: &'a str,
    },
    TimedOut {
        job_id: &'a str,
        polls: u32,
    },
    Cancelled {
        job_id: Option<&'a str>,
    },
}

/// Trait for receiving job events (decoupled logging).
pub trait JobReporter: Send + Sync {
    fn report(&self, event: JobEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingJobReporter;

impl JobReporter for TracingJobReporter {
    fn report(&self, event: JobEvent<'_>) {
        match event {
            JobEvent::Submitted { job_id, source } => {
                tracing::info!(%job_id, %source, "Job submitted");
            }
            JobEvent::Polled {
                job_id,
                attempt,
                status,
            } => {
                tracing::debug!(%job_id, %attempt, %status, "Job polled");
            }
            JobEvent::PollRetry {
                job_id,
                attempt,
                error,
            } => {
                tracing::warn!(%job_id, %attempt, %error, "Status poll failed, retrying");
            }
            JobEvent::Done { job_id, elapsed } => {
                tracing::info!(%job_id, elapsed_ms = %elapsed.as_millis(), "Job done");
            }
            JobEvent::Fetched { job_id, results } => {
                tracing::info!(%job_id, %results, "Job results fetched");
            }
            JobEvent::Faulted { job_id, message } => {
                tracing::warn!(%job_id, %message, "Job faulted");
            }
            JobEvent::TimedOut { job_id, polls } => {
                tracing::warn!(%job_id, %polls, "Job did not complete in time");
            }
            JobEvent::Cancelled { job_id } => {
                tracing::info!(?job_id, "Job cancelled");
            }
        }
    }
}

/// Drives one async job from submission to fetched results.
#[derive(Clone)]
pub struct JobDriver<T: Transport> {
    transport: T,
    credentials: Credentials,
    submit_url: String,
    reporter: Arc<dyn JobReporter>,
}

impl<T: Transport> JobDriver<T> {
    pub fn new(transport: T, credentials: Credentials, submit_url: impl Into<String>) -> Self {
        Self {
            transport,
            credentials,
            submit_url: submit_url.into(),
            reporter: Arc::new(TracingJobReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn JobReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }

    /// Run the full job lifecycle.
    ///
    /// The deadline is checked before each wait and every wait is followed by
    /// one status GET, so the poll phase ends within
    /// `job_completion_timeout + request_timeout`. Counted from the end of
    /// the submit, the call returns within
    /// `job_completion_timeout + 2 * request_timeout`. `cancel` interrupts
    /// any wait with [`ScrapeError::Cancelled`].
    pub async fn run(
        &self,
        payload: &Payload,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Response, ScrapeError> {
        let mut job = self.submit(payload, config, cancel).await?;

        let outcome = match self.poll(&mut job, config, cancel).await {
            Ok(()) => self.fetch(&job, config, cancel).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            self.report_failure(&job, e);
        }
        outcome
    }

    async fn submit(
        &self,
        payload: &Payload,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Job, ScrapeError> {
        let submission = transport::send(
            &self.transport,
            RequestKind::Submit,
            &self.submit_url,
            Some(payload),
            config.request_timeout,
            &self.credentials,
            cancel,
        )
        .await
        .inspect_err(|e| {
            if *e == ScrapeError::Cancelled {
                self.reporter.report(JobEvent::Cancelled { job_id: None });
            }
        })?;

        let created_at = Instant::now();
        let job = Job::from_submission(
            &submission,
            &self.submit_url,
            created_at,
            created_at + config.job_completion_timeout,
        )?;

        self.reporter.report(JobEvent::Submitted {
            job_id: &job.id,
            source: payload.source().unwrap_or_default(),
        });
        Ok(job)
    }

    async fn poll(
        &self,
        job: &mut Job,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<(), ScrapeError> {
        while !job.status.is_terminal() {
            let now = Instant::now();
            if job.is_expired(now) {
                return Err(ScrapeError::Timeout {
                    after: config.job_completion_timeout,
                    job_id: Some(job.id.clone()),
                });
            }

            let wait = config.poll_interval.min(job.deadline - now);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ScrapeError::Cancelled),
                () = tokio::time::sleep(wait) => {}
            }

            job.polls += 1;
            let attempt = job.polls;
            let result = transport::send(
                &self.transport,
                RequestKind::Poll,
                &job.links.status,
                None,
                config.request_timeout,
                &self.credentials,
                cancel,
            )
            .await;

            match result {
                Ok(document) => {
                    let status = JobStatus::from_document(&document);
                    job.transition(status);
                    self.reporter.report(JobEvent::Polled {
                        job_id: &job.id,
                        attempt,
                        status,
                    });
                    if status == JobStatus::Faulted {
                        return Err(ScrapeError::ServiceError {
                            message: diagnostic(&document, &job.id),
                            job_id: Some(job.id.clone()),
                        });
                    }
                }
                Err(e) if e.is_retryable() => {
                    self.reporter.report(JobEvent::PollRetry {
                        job_id: &job.id,
                        attempt,
                        error: &e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if job.status == JobStatus::Faulted {
            return Err(ScrapeError::ServiceError {
                message: format!("Job {} faulted", job.id),
                job_id: Some(job.id.clone()),
            });
        }

        self.reporter.report(JobEvent::Done {
            job_id: &job.id,
            elapsed: job.created_at.elapsed(),
        });
        Ok(())
    }

    async fn fetch(
        &self,
        job: &Job,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Response, ScrapeError> {
        let body = transport::send(
            &self.transport,
            RequestKind::Fetch,
            &job.links.results,
            None,
            config.request_timeout,
            &self.credentials,
            cancel,
        )
        .await
        .map_err(|e| e.with_job_id(&job.id))?;

        let response = Response::new(body);
        self.reporter.report(JobEvent::Fetched {
            job_id: &job.id,
            results: response.results().len(),
        });
        Ok(response)
    }

    fn report_failure(&self, job: &Job, error: &ScrapeError) {
        match error {
            ScrapeError::Cancelled => self.reporter.report(JobEvent::Cancelled {
                job_id: Some(&job.id),
            }),
            ScrapeError::Timeout { .. } => self.reporter.report(JobEvent::TimedOut {
                job_id: &job.id,
                polls: job.polls,
            }),
            ScrapeError::ServiceError { message, .. } => self.reporter.report(JobEvent::Faulted {
                job_id: &job.id,
                message,
            }),
            _ => {}
        }
    }
}

/// Best-effort diagnostic from a faulted status document.
fn diagnostic(document: &Value, job_id: &str) -> String {
    document
        .get("message")
        .or_else(|| document.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Job {job_id} faulted"))
}
