use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tokio::time::Instant;
use url::Url;

use crate::error::ScrapeError;

/// Status of an async job as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Done,
    Faulted,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Done => "done",
            JobStatus::Faulted => "faulted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Faulted)
    }

    /// Read the `status` field of a status document.
    ///
    /// Unknown or missing values count as pending; the service adds
    /// intermediate states over time and all of them mean "keep polling".
    pub fn from_document(document: &Value) -> Self {
        document
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(JobStatus::Pending)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "done" => Ok(JobStatus::Done),
            "faulted" | "failed" => Ok(JobStatus::Faulted),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}

/// Where to poll and where to fetch for a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLinks {
    pub status: String,
    pub results: String,
}

impl JobLinks {
    /// Resolve links from a submission response.
    ///
    /// Accepts `_links` as `{"self": .., "results": ..}` or as the array form
    /// `[{"rel": "self", "href": ..}, ...]`. Falls back to
    /// `{submit_url}/{id}` and `{submit_url}/{id}/results`.
    pub fn resolve(
        submission: &Value,
        submit_url: &str,
        job_id: &str,
    ) -> Result<Self, ScrapeError> {
        let links = submission.get("_links");
        let status = links.and_then(|l| link(l, "self"));
        let results = links.and_then(|l| link(l, "results"));

        match (status, results) {
            (Some(status), Some(results)) => Ok(Self { status, results }),
            (status, results) => {
                let base = Url::parse(submit_url.trim_end_matches('/')).map_err(|e| {
                    ScrapeError::ProtocolError(format!(
                        "Cannot derive job links from {submit_url}: {e}"
                    ))
                })?;
                let derived_status = format!("{}/{job_id}", base.as_str().trim_end_matches('/'));

                Ok(Self {
                    results: results.unwrap_or_else(|| format!("{derived_status}/results")),
                    status: status.unwrap_or(derived_status),
                })
            }
        }
    }
}

fn link(links: &Value, rel: &str) -> Option<String> {
    match links {
        Value::Object(map) => map.get(rel).and_then(href),
        Value::Array(items) => items
            .iter()
            .find(|item| item.get("rel").and_then(Value::as_str) == Some(rel))
            .and_then(href),
        _ => None,
    }
}

fn href(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => value.get("href").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// A submitted job, alive only for the duration of one driver call.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub links: JobLinks,
    /// Status GETs issued so far.
    pub polls: u32,
    pub created_at: Instant,
    pub deadline: Instant,
}

impl Job {
    /// Build a job from the submission response body.
    pub fn from_submission(
        submission: &Value,
        submit_url: &str,
        created_at: Instant,
        deadline: Instant,
    ) -> Result<Self, ScrapeError> {
        let id = match submission.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(ScrapeError::ProtocolError(
                    "Submission response has no job id".into(),
                ));
            }
        };
        let links = JobLinks::resolve(submission, submit_url, &id)?;

        Ok(Self {
            status: JobStatus::from_document(submission),
            id,
            links,
            polls: 0,
            created_at,
            deadline,
        })
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Move to a new status. Terminal states are final.
    pub fn transition(&mut self, status: JobStatus) {
        if !self.status.is_terminal() {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    const SUBMIT: &str = "https://data.oxylabs.io/v1/queries";

    #[test]
    fn test_job_status_roundtrip() {
        for status in [JobStatus::Pending, JobStatus::Done, JobStatus::Faulted] {
            let parsed: JobStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!("failed".parse::<JobStatus>().unwrap(), JobStatus::Faulted);
    }

    #[test]
    fn test_unknown_status_counts_as_pending() {
        assert_eq!(
            JobStatus::from_document(&json!({"status": "queued"})),
            JobStatus::Pending
        );
        assert_eq!(JobStatus::from_document(&json!({})), JobStatus::Pending);
        assert_eq!(
            JobStatus::from_document(&json!({"status": "DONE"})),
            JobStatus::Done
        );
    }

    #[test]
    fn test_links_object_form() {
        let body = json!({
            "id": "J",
            "_links": {"self": "https://s/J", "results": "https://s/J/results"}
        });
        let links = JobLinks::resolve(&body, SUBMIT, "J").unwrap();
        assert_eq!(links.status, "https://s/J");
        assert_eq!(links.results, "https://s/J/results");
    }

    #[test]
    fn test_links_array_form() {
        let body = json!({
            "id": "J",
            "_links": [
                {"rel": "self", "href": "https://s/J", "method": "GET"},
                {"rel": "results", "href": "https://s/J/results", "method": "GET"}
            ]
        });
        let links = JobLinks::resolve(&body, SUBMIT, "J").unwrap();
        assert_eq!(links.status, "https://s/J");
        assert_eq!(links.results, "https://s/J/results");
    }

    #[test]
    fn test_links_derived_when_missing() {
        let links = JobLinks::resolve(&json!({"id": "J"}), SUBMIT, "J").unwrap();
        assert_eq!(links.status, "https://data.oxylabs.io/v1/queries/J");
        assert_eq!(links.results, "https://data.oxylabs.io/v1/queries/J/results");
    }

    #[test]
    fn test_links_partial_self_only() {
        let body = json!({"id": "J", "_links": {"self": "https://s/J"}});
        let links = JobLinks::resolve(&body, SUBMIT, "J").unwrap();
        assert_eq!(links.status, "https://s/J");
        assert_eq!(links.results, "https://data.oxylabs.io/v1/queries/J/results");
    }

    #[test]
    fn test_links_partial_results_only() {
        let body = json!({
            "id": "J",
            "_links": [{"rel": "results", "href": "https://s/J/results"}]
        });
        let links = JobLinks::resolve(&body, SUBMIT, "J").unwrap();
        assert_eq!(links.status, "https://data.oxylabs.io/v1/queries/J");
        assert_eq!(links.results, "https://s/J/results");
    }

    #[test]
    fn test_job_requires_id() {
        let now = Instant::now();
        let err = Job::from_submission(&json!({"status": "pending"}), SUBMIT, now, now)
            .unwrap_err();
        assert!(matches!(err, ScrapeError::ProtocolError(_)));
    }

    #[test]
    fn test_terminal_status_is_final() {
        let now = Instant::now();
        let mut job = Job::from_submission(
            &json!({"id": 42, "status": "pending"}),
            SUBMIT,
            now,
            now + Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(job.id, "42");

        job.transition(JobStatus::Done);
        job.transition(JobStatus::Pending);
        assert_eq!(job.status, JobStatus::Done);
        assert!(!job.is_expired(now));
        assert!(job.is_expired(now + Duration::from_secs(5)));
    }
}
