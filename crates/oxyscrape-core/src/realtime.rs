use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::ScrapeError;
use crate::payload::Payload;
use crate::response::Response;
use crate::transport::{self, RequestKind, Transport};

pub const DEFAULT_REALTIME_URL: &str = "https://realtime.oxylabs.io/v1/queries";

/// Single POST to the realtime endpoint; the reply body is the result.
///
/// No retries. Wall time is bounded by `config.request_timeout`.
#[derive(Clone)]
pub struct RealtimeDriver<T: Transport> {
    transport: T,
    credentials: Credentials,
    endpoint: String,
}

impl<T: Transport> RealtimeDriver<T> {
    pub fn new(transport: T, credentials: Credentials, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            credentials,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn run(
        &self,
        payload: &Payload,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Response, ScrapeError> {
        let source = payload.source().unwrap_or_default();
        tracing::info!(%source, endpoint = %self.endpoint, "Submitting realtime query");

        let body = transport::send(
            &self.transport,
            RequestKind::Submit,
            &self.endpoint,
            Some(payload),
            config.request_timeout,
            &self.credentials,
            cancel,
        )
        .await
        .inspect_err(|e| tracing::warn!(%source, error = %e, "Realtime query failed"))?;

        Ok(Response::new(body))
    }
}
