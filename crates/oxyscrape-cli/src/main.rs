use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use oxyscrape_client::{CallOptions, ClientBuilder};
use oxyscrape_core::{Credentials, Response, Source};

#[derive(Parser)]
#[command(name = "oxyscrape", version, about = "Query the Oxylabs scraper API")]
struct Cli {
    /// API username (reads from OXYLABS_USERNAME if not provided)
    #[arg(long, env = "OXYLABS_USERNAME", global = true, hide_env_values = true)]
    username: Option<String>,

    /// API password (reads from OXYLABS_PASSWORD if not provided)
    #[arg(long, env = "OXYLABS_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the response body as JSON
    Scrape {
        /// Source tag, e.g. "bing_search" or "universal"
        #[arg(short, long)]
        source: String,

        /// Search term, ASIN, product id, ...
        #[arg(short, long, conflicts_with = "url")]
        query: Option<String>,

        /// Target URL for URL-based sources
        #[arg(short, long)]
        url: Option<String>,

        /// Extra payload field as key=JSON (repeatable), e.g. --field limit=10
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,

        /// Use the async job endpoint (submit, poll, fetch) instead of realtime
        #[arg(long = "async", default_value_t = false)]
        use_async: bool,

        /// Per-request timeout in seconds
        #[arg(long)]
        request_timeout: Option<u64>,

        /// Seconds between status polls (async only)
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Maximum seconds spent polling (async only)
        #[arg(long)]
        job_completion_timeout: Option<u64>,

        /// Override the realtime endpoint
        #[arg(long, env = "OXYLABS_REALTIME_URL")]
        realtime_url: Option<String>,

        /// Override the async submission endpoint
        #[arg(long, env = "OXYLABS_ASYNC_URL")]
        async_url: Option<String>,
    },

    /// List recognized source tags
    Sources,
}

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("oxyscrape=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            source,
            query,
            url,
            fields,
            use_async,
            request_timeout,
            poll_interval,
            job_completion_timeout,
            realtime_url,
            async_url,
        } => {
            let source: Source = source.parse()?;
            let credentials = credentials(cli.username, cli.password)?;

            let mut builder = ClientBuilder::new().credentials(credentials);
            if let Some(url) = realtime_url {
                builder = builder.realtime_url(url);
            }
            if let Some(url) = async_url {
                builder = builder.async_url(url);
            }

            let mut target = Map::new();
            if let Some(query) = query {
                target.insert("query".into(), Value::String(query));
            }
            if let Some(url) = url {
                target.insert("url".into(), Value::String(url));
            }

            let mut call = CallOptions::new().with_extras(fields.into_iter().collect());
            if let Some(secs) = request_timeout {
                call = call.with_request_timeout(Duration::from_secs(secs));
            }
            if let Some(secs) = poll_interval {
                call = call.with_poll_interval(Duration::from_secs(secs));
            }
            if let Some(secs) = job_completion_timeout {
                call = call.with_job_completion_timeout(Duration::from_secs(secs));
            }

            let response = cmd_scrape(builder, source, &target, call, use_async)?;
            println!("{}", serde_json::to_string_pretty(response.raw())?);
        }
        Commands::Sources => {
            for source in Source::ALL {
                println!("{source}");
            }
        }
    }

    Ok(())
}

fn credentials(username: Option<String>, password: Option<String>) -> Result<Credentials> {
    let username = username.context("OXYLABS_USERNAME not set. Pass --username or set it in .env")?;
    let password = password.context("OXYLABS_PASSWORD not set. Pass --password or set it in .env")?;
    Ok(Credentials::new(username, password)?)
}

/// Run one query. Ctrl-C cancels it.
fn cmd_scrape(
    builder: ClientBuilder,
    source: Source,
    target: &Map<String, Value>,
    call: CallOptions,
    use_async: bool,
) -> Result<Response> {
    // Signal handling lives on its own runtime so the blocking client can
    // keep the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let cancel = CancellationToken::new();
    watch_ctrl_c(&runtime, cancel.clone());
    let call = call.with_cancel(cancel);

    tracing::info!(%source, mode = if use_async { "async" } else { "realtime" }, "Scraping");

    let response = if use_async {
        let client = builder.build_async()?;
        runtime.block_on(client.scrape(source, target, &call))?
    } else {
        let client = builder.build()?;
        client.scrape(source, target, &call)?
    };

    tracing::info!(results = response.results().len(), "Done");
    Ok(response)
}

fn watch_ctrl_c(runtime: &Runtime, cancel: CancellationToken) {
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });
}

/// Parse `key=value`. The value is JSON when it parses as JSON, otherwise a
/// plain string, so `--field domain=com` works without quoting.
fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
