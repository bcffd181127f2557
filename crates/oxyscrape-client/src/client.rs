use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use oxyscrape_core::job_driver::DEFAULT_ASYNC_URL;
use oxyscrape_core::realtime::DEFAULT_REALTIME_URL;
use oxyscrape_core::{
    Config, Credentials, Extras, JobDriver, JobReporter, Mode, Payload, RealtimeDriver, Response,
    ScrapeError, Source, TracingJobReporter, Transport,
};
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::sources::{
    Amazon, Baidu, Bing, Ecommerce, Google, GoogleShopping, Kroger, Serp, Universal, Wayfair,
    Yandex, YoutubeTranscript,
};
use crate::transport::ReqwestTransport;

// ---------------------------------------------------------------------------
// Per-call options
// ---------------------------------------------------------------------------

/// Timing overrides, extras and cancellation for a single call.
///
/// Unset durations fall back to the service defaults (165 s request,
/// 2 s poll interval, 50 s job completion).
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub request_timeout: Option<Duration>,
    pub poll_interval: Option<Duration>,
    pub job_completion_timeout: Option<Duration>,
    /// Wire fields merged into the payload after the typed options.
    pub extras: Extras,
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_job_completion_timeout(mut self, timeout: Duration) -> Self {
        self.job_completion_timeout = Some(timeout);
        self
    }

    /// Add one extra wire field. A `null` value removes the field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras.extend(extras);
        self
    }

    /// Cancelling `token` aborts the call with [`ScrapeError::Cancelled`].
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self, mode: Mode) -> Result<Config, ScrapeError> {
        Config::prepare(
            self.request_timeout,
            self.poll_interval,
            self.job_completion_timeout,
            mode,
        )
    }

    fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// How a client flavor turns a built payload into a result.
///
/// Facades are generic over this: the same `scrape_*` method returns a
/// `Result` on [`Client`] and a future on [`AsyncClient`].
pub trait Dispatch {
    type Output<'a>
    where
        Self: 'a;

    /// Run the call. A payload error must surface before any request is made.
    fn dispatch(
        &self,
        payload: Result<Payload, ScrapeError>,
        call: &CallOptions,
    ) -> Self::Output<'_>;
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures endpoints, credentials and reporting for either client flavor.
pub struct ClientBuilder {
    credentials: Option<Credentials>,
    realtime_url: String,
    async_url: String,
    reporter: Arc<dyn JobReporter>,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            credentials: None,
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
            async_url: DEFAULT_ASYNC_URL.to_string(),
            reporter: Arc::new(TracingJobReporter),
            http: None,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without this, credentials are read from `OXYLABS_USERNAME` and
    /// `OXYLABS_PASSWORD` at build time.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn realtime_url(mut self, url: impl Into<String>) -> Self {
        self.realtime_url = url.into();
        self
    }

    /// Job submission URL; status and result links are taken from the
    /// submission response.
    pub fn async_url(mut self, url: impl Into<String>) -> Self {
        self.async_url = url.into();
        self
    }

    /// Receives job lifecycle events from [`AsyncClient`] calls.
    pub fn reporter(mut self, reporter: Arc<dyn JobReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Send requests through a preconfigured reqwest client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<Client, ScrapeError> {
        let transport = self.reqwest_transport()?;
        self.build_with_transport(transport)
    }

    pub fn build_async(self) -> Result<AsyncClient, ScrapeError> {
        let transport = self.reqwest_transport()?;
        self.build_async_with_transport(transport)
    }

    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<Client<T>, ScrapeError> {
        let endpoint = validate_endpoint(&self.realtime_url)?;
        let credentials = resolve_credentials(self.credentials)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ScrapeError::invalid(format!("Failed to start runtime: {e}")))?;

        Ok(Client {
            driver: Arc::new(RealtimeDriver::new(transport, credentials, endpoint)),
            runtime: Arc::new(runtime),
        })
    }

    pub fn build_async_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<AsyncClient<T>, ScrapeError> {
        let endpoint = validate_endpoint(&self.async_url)?;
        let credentials = resolve_credentials(self.credentials)?;
        let driver = JobDriver::new(transport, credentials, endpoint).with_reporter(self.reporter);

        Ok(AsyncClient {
            driver: Arc::new(driver),
        })
    }

    fn reqwest_transport(&self) -> Result<ReqwestTransport, ScrapeError> {
        match &self.http {
            Some(client) => Ok(ReqwestTransport::with_client(client.clone())),
            None => ReqwestTransport::new(),
        }
    }
}

fn resolve_credentials(credentials: Option<Credentials>) -> Result<Credentials, ScrapeError> {
    match credentials {
        Some(credentials) => Ok(credentials),
        None => Credentials::from_env(),
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String, ScrapeError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ScrapeError::invalid(format!("Invalid endpoint '{endpoint}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(endpoint.trim_end_matches('/').to_string()),
        scheme => Err(ScrapeError::invalid(format!(
            "Endpoint '{endpoint}' must be http or https, got {scheme}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Client (blocking, realtime)
// ---------------------------------------------------------------------------

/// Blocking client for the realtime endpoint.
///
/// Each call blocks the current thread on a private current-thread runtime;
/// no threads are spawned. Do not call (or drop the last clone) from inside
/// an async context; use [`AsyncClient`] there.
#[derive(Clone)]
pub struct Client<T: Transport = ReqwestTransport> {
    driver: Arc<RealtimeDriver<T>>,
    runtime: Arc<Runtime>,
}

impl Client {
    pub fn new(username: &str, password: &str) -> Result<Self, ScrapeError> {
        ClientBuilder::new()
            .credentials(Credentials::new(username, password)?)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> Client<T> {
    pub fn endpoint(&self) -> &str {
        self.driver.endpoint()
    }

    /// Scrape any source with free-form fields.
    pub fn scrape<F: Serialize + ?Sized>(
        &self,
        source: Source,
        fields: &F,
        call: &CallOptions,
    ) -> Result<Response, ScrapeError> {
        self.dispatch(Payload::build(source, fields, &call.extras), call)
    }

    pub fn amazon(&self) -> Amazon<'_, Self> {
        Amazon::new(self)
    }

    pub fn bing(&self) -> Bing<'_, Self> {
        Bing::new(self)
    }

    pub fn google(&self) -> Google<'_, Self> {
        Google::new(self)
    }

    pub fn google_shopping(&self) -> GoogleShopping<'_, Self> {
        GoogleShopping::new(self)
    }

    pub fn kroger(&self) -> Kroger<'_, Self> {
        Kroger::new(self)
    }

    pub fn universal(&self) -> Universal<'_, Self> {
        Universal::new(self)
    }

    pub fn wayfair(&self) -> Wayfair<'_, Self> {
        Wayfair::new(self)
    }

    pub fn youtube_transcript(&self) -> YoutubeTranscript<'_, Self> {
        YoutubeTranscript::new(self)
    }

    pub fn baidu(&self) -> Baidu<'_, Self> {
        Baidu::new(self)
    }

    pub fn yandex(&self) -> Yandex<'_, Self> {
        Yandex::new(self)
    }

    pub fn serp(&self) -> Serp<'_, Self> {
        Serp::new(self)
    }

    pub fn ecommerce(&self) -> Ecommerce<'_, Self> {
        Ecommerce::new(self)
    }
}

impl<T: Transport> Dispatch for Client<T> {
    type Output<'a>
        = Result<Response, ScrapeError>
    where
        Self: 'a;

    fn dispatch(
        &self,
        payload: Result<Payload, ScrapeError>,
        call: &CallOptions,
    ) -> Self::Output<'_> {
        let payload = payload?;
        let config = call.config(Mode::Realtime)?;
        let cancel = call.cancel_token();

        self.runtime
            .block_on(self.driver.run(&payload, &config, &cancel))
    }
}

// ---------------------------------------------------------------------------
// AsyncClient (futures, job mode)
// ---------------------------------------------------------------------------

/// Async client for the job endpoint: submit, poll, fetch.
///
/// Calls return futures; every wait is a suspension point. Dropping the
/// future abandons the call.
#[derive(Clone)]
pub struct AsyncClient<T: Transport = ReqwestTransport> {
    driver: Arc<JobDriver<T>>,
}

impl AsyncClient {
    pub fn new(username: &str, password: &str) -> Result<Self, ScrapeError> {
        ClientBuilder::new()
            .credentials(Credentials::new(username, password)?)
            .build_async()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> AsyncClient<T> {
    pub fn submit_url(&self) -> &str {
        self.driver.submit_url()
    }

    /// Scrape any source with free-form fields.
    pub fn scrape<F: Serialize + ?Sized>(
        &self,
        source: Source,
        fields: &F,
        call: &CallOptions,
    ) -> BoxFuture<'_, Result<Response, ScrapeError>> {
        self.dispatch(Payload::build(source, fields, &call.extras), call)
    }

    pub fn amazon(&self) -> Amazon<'_, Self> {
        Amazon::new(self)
    }

    pub fn bing(&self) -> Bing<'_, Self> {
        Bing::new(self)
    }

    pub fn google(&self) -> Google<'_, Self> {
        Google::new(self)
    }

    pub fn google_shopping(&self) -> GoogleShopping<'_, Self> {
        GoogleShopping::new(self)
    }

    pub fn kroger(&self) -> Kroger<'_, Self> {
        Kroger::new(self)
    }

    pub fn universal(&self) -> Universal<'_, Self> {
        Universal::new(self)
    }

    pub fn wayfair(&self) -> Wayfair<'_, Self> {
        Wayfair::new(self)
    }

    pub fn youtube_transcript(&self) -> YoutubeTranscript<'_, Self> {
        YoutubeTranscript::new(self)
    }

    pub fn baidu(&self) -> Baidu<'_, Self> {
        Baidu::new(self)
    }

    pub fn yandex(&self) -> Yandex<'_, Self> {
        Yandex::new(self)
    }

    pub fn serp(&self) -> Serp<'_, Self> {
        Serp::new(self)
    }

    pub fn ecommerce(&self) -> Ecommerce<'_, Self> {
        Ecommerce::new(self)
    }
}

impl<T: Transport> Dispatch for AsyncClient<T> {
    type Output<'a>
        = BoxFuture<'a, Result<Response, ScrapeError>>
    where
        Self: 'a;

    fn dispatch(
        &self,
        payload: Result<Payload, ScrapeError>,
        call: &CallOptions,
    ) -> Self::Output<'_> {
        let prepared = payload.and_then(|payload| Ok((payload, call.config(Mode::Async)?)));
        let cancel = call.cancel_token();

        Box::pin(async move {
            let (payload, config) = prepared?;
            self.driver.run(&payload, &config, &cancel).await
        })
    }
}
