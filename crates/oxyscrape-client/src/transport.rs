use oxyscrape_core::error::ScrapeError;
use oxyscrape_core::transport::{HttpMethod, HttpReply, HttpRequest, Transport};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("oxyscrape-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP transport using reqwest.
///
/// Holds one connection pool shared by every facade of a client. Each
/// request carries its own timeout; nothing is retried here.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::invalid(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Use a preconfigured reqwest client (proxies, TLS settings, ...).
    ///
    /// The client's own `User-Agent` is overridden per request.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest<'_>) -> Result<HttpReply, ScrapeError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(request.url),
            HttpMethod::Post => self.client.post(request.url),
        };

        let mut builder = builder
            .header(AUTHORIZATION, request.credentials.authorization_header())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(request.timeout);

        if let Some(payload) = request.body {
            // Sets `Content-Type: application/json`.
            builder = builder.json(payload);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(url = request.url, error = %e, "HTTP request failed");
            if e.is_timeout() {
                ScrapeError::Timeout {
                    after: request.timeout,
                    job_id: None,
                }
            } else if e.is_builder() {
                ScrapeError::invalid(format!("Invalid request to {}: {e}", request.url))
            } else if e.is_connect() {
                ScrapeError::TransientError {
                    status: None,
                    message: format!("Connection failed: {e}"),
                }
            } else {
                ScrapeError::TransientError {
                    status: None,
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout {
                    after: request.timeout,
                    job_id: None,
                }
            } else {
                ScrapeError::ProtocolError(format!("Failed to read response body: {e}"))
            }
        })?;

        Ok(HttpReply { status, body })
    }
}
