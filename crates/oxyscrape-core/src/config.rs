use std::time::Duration;

use crate::error::ScrapeError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(165);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_JOB_COMPLETION_TIMEOUT: Duration = Duration::from_secs(50);

/// Which driver carries a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One POST returns the result.
    Realtime,
    /// Submit, poll status, fetch results.
    Async,
}

/// Resolved timing for a single call. Immutable once prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub job_completion_timeout: Duration,
    pub mode: Mode,
}

impl Config {
    /// Apply defaults to the given overrides and validate the result.
    ///
    /// All durations must be non-zero, and in async mode the poll interval
    /// may not exceed the job completion timeout.
    pub fn prepare(
        request_timeout: Option<Duration>,
        poll_interval: Option<Duration>,
        job_completion_timeout: Option<Duration>,
        mode: Mode,
    ) -> Result<Self, ScrapeError> {
        let config = Self {
            request_timeout: request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            poll_interval: poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
            job_completion_timeout: job_completion_timeout
                .unwrap_or(DEFAULT_JOB_COMPLETION_TIMEOUT),
            mode,
        };

        for (name, value) in [
            ("request_timeout", config.request_timeout),
            ("poll_interval", config.poll_interval),
            ("job_completion_timeout", config.job_completion_timeout),
        ] {
            if value.is_zero() {
                return Err(ScrapeError::invalid(format!("{name} must be positive")));
            }
        }

        if mode == Mode::Async && config.poll_interval > config.job_completion_timeout {
            return Err(ScrapeError::invalid(format!(
                "poll_interval ({:?}) must not exceed job_completion_timeout ({:?})",
                config.poll_interval, config.job_completion_timeout
            )));
        }

        Ok(config)
    }
}
