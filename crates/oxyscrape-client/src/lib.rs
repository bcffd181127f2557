//! Clients for the Oxylabs scraper API.
//!
//! [`Client`] blocks on the realtime endpoint; [`AsyncClient`] returns
//! futures and drives the submit, poll and fetch job cycle. Both expose the
//! same per-source facades:
//!
//! ```no_run
//! use oxyscrape_client::{BingSearchOptions, CallOptions, Client};
//!
//! # fn main() -> Result<(), oxyscrape_core::ScrapeError> {
//! let client = Client::new("user", "pass")?;
//! let options = BingSearchOptions {
//!     domain: Some("com".into()),
//!     limit: Some(10),
//!     ..Default::default()
//! };
//! let response = client.bing().scrape_search("nike", &options, &CallOptions::new())?;
//! println!("{} results", response.results().len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod sources;
pub mod transport;

pub use client::{AsyncClient, CallOptions, Client, ClientBuilder, Dispatch};
pub use sources::*;
pub use transport::{ReqwestTransport, USER_AGENT};
