//! Per-source option records and facades.
//!
//! A facade borrows its client and fixes the `source` tag; the client flavor
//! decides whether the call goes through the realtime or the job driver.
//! Unset options are `None` and never reach the wire.

mod amazon;
mod baidu;
mod bing;
mod google;
mod google_shopping;
mod groups;
mod kroger;
mod universal;
mod wayfair;
mod yandex;
mod youtube;

use oxyscrape_core::{ContextEntry, Payload, ScrapeError, Source};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::CallOptions;

pub use amazon::{Amazon, AmazonProductOptions, AmazonSearchOptions, AmazonUrlOptions};
pub use baidu::{Baidu, BaiduSearchOptions, BaiduUrlOptions};
pub use bing::{Bing, BingSearchOptions, BingUrlOptions};
pub use google::{
    Google, GoogleHotelsOptions, GoogleImagesOptions, GoogleSearchOptions, GoogleSuggestOptions,
    GoogleUrlOptions,
};
pub use google_shopping::{
    GoogleShopping, GoogleShoppingPricingOptions, GoogleShoppingProductOptions,
    GoogleShoppingSearchOptions, GoogleShoppingUrlOptions,
};
pub use groups::{Ecommerce, Serp};
pub use kroger::{FulfillmentType, Kroger, KrogerOptions, KrogerSearchOptions};
pub use universal::{Universal, UniversalOptions};
pub use wayfair::{Wayfair, WayfairSearchOptions, WayfairUrlOptions};
pub use yandex::{Yandex, YandexSearchOptions, YandexUrlOptions};
pub use youtube::{TranscriptOrigin, YoutubeTranscript, YoutubeTranscriptOptions};

/// Device profile the service emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAgentType {
    Desktop,
    DesktopChrome,
    DesktopEdge,
    DesktopFirefox,
    DesktopOpera,
    DesktopSafari,
    Mobile,
    MobileAndroid,
    MobileIos,
    Tablet,
    TabletAndroid,
    TabletIos,
}

/// JavaScript rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Render {
    Html,
    Png,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentEncoding {
    Base64,
}

/// Accumulates typed context fields, then appends raw entries.
#[derive(Default)]
pub(crate) struct Context(Vec<ContextEntry>);

impl Context {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Skips `None`. Option values are plain data, so serialization does not
    /// fail.
    pub(crate) fn with<V: Serialize>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value.and_then(|v| serde_json::to_value(v).ok()) {
            self.0.push(ContextEntry::new(key, value));
        }
        self
    }

    pub(crate) fn finish(mut self, raw: &[ContextEntry]) -> Vec<ContextEntry> {
        self.0.extend_from_slice(raw);
        self.0
    }
}

/// Build the wire payload for one facade call.
///
/// Field order is: target (`query`, `url`, ...), typed options in
/// declaration order, `context`, then extras.
pub(crate) fn payload<O: Serialize>(
    source: Source,
    target: (&str, &str),
    options: &O,
    context: Vec<ContextEntry>,
    call: &CallOptions,
) -> Result<Payload, ScrapeError> {
    let (key, value) = target;
    let mut fields = Map::new();
    fields.insert(key.to_string(), Value::from(value));

    let typed = serde_json::to_value(options)
        .map_err(|e| ScrapeError::invalid(format!("Failed to serialize {source} options: {e}")))?;
    if let Value::Object(typed) = typed {
        fields.extend(typed);
    }

    if !context.is_empty() {
        let context = serde_json::to_value(context)
            .map_err(|e| ScrapeError::invalid(format!("Failed to serialize context: {e}")))?;
        fields.insert("context".to_string(), context);
    }

    Payload::build(source, &fields, &call.extras)
}

#[cfg(test)]
pub(crate) mod capture {
    use oxyscrape_core::{Payload, ScrapeError};
    use serde_json::Value;

    use crate::client::{CallOptions, Dispatch};

    /// Dispatcher that hands back the payload instead of sending it.
    pub(crate) struct Capture;

    impl Dispatch for Capture {
        type Output<'a> = Result<Value, ScrapeError>;

        fn dispatch(
            &self,
            payload: Result<Payload, ScrapeError>,
            _call: &CallOptions,
        ) -> Self::Output<'_> {
            payload.map(Payload::into_value)
        }
    }
}
