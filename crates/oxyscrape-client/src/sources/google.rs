use oxyscrape_core::{ContextEntry, Source};
use serde::Serialize;
use serde_json::Value;

use super::{Context, Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

/// Options for Google web search and ads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearchOptions {
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    #[serde(skip)]
    pub results_language: Option<String>,
    /// `0` disables Google's duplicate filter.
    #[serde(skip)]
    pub filter: Option<u8>,
    /// Turn off spelling auto-correction.
    #[serde(skip)]
    pub nfpr: Option<bool>,
    #[serde(skip)]
    pub safe_search: Option<bool>,
    /// Vertical, e.g. `isch` or `nws`.
    #[serde(skip)]
    pub tbm: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl GoogleSearchOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("results_language", self.results_language.clone())
            .with("filter", self.filter)
            .with("nfpr", self.nfpr)
            .with("safe_search", self.safe_search)
            .with("tbm", self.tbm.clone())
            .finish(&self.context)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleUrlOptions {
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSuggestOptions {
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parsing_instructions: Option<Value>,
}

/// Options for Google hotel and travel-hotel listings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleHotelsOptions {
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parsing_instructions: Option<Value>,
    #[serde(skip)]
    pub results_language: Option<String>,
    #[serde(skip)]
    pub hotel_occupancy: Option<u32>,
    /// Check-in and check-out, `YYYY-MM-DD,YYYY-MM-DD`.
    #[serde(skip)]
    pub hotel_dates: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl GoogleHotelsOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("results_language", self.results_language.clone())
            .with("hotel_occupancy", self.hotel_occupancy)
            .with("hotel_dates", self.hotel_dates.clone())
            .finish(&self.context)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleImagesOptions {
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    #[serde(skip)]
    pub results_language: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

pub struct Google<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Google<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &GoogleSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleSearch,
            ("query", query),
            options,
            options.context(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &GoogleUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Google, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    /// Search results with paid placements.
    pub fn scrape_ads(
        &self,
        query: &str,
        options: &GoogleSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleAds,
            ("query", query),
            options,
            options.context(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    /// Autocomplete suggestions for a partial query.
    pub fn scrape_suggestions(
        &self,
        query: &str,
        options: &GoogleSuggestOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::GoogleSuggest, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_hotels(
        &self,
        query: &str,
        options: &GoogleHotelsOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleHotels,
            ("query", query),
            options,
            options.context(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    pub fn scrape_travel_hotels(
        &self,
        query: &str,
        options: &GoogleHotelsOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleTravelHotels,
            ("query", query),
            options,
            options.context(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    /// Reverse image search; `image_url` is the picture to look up.
    pub fn scrape_images(
        &self,
        image_url: &str,
        options: &GoogleImagesOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let context = Context::new()
            .with("results_language", options.results_language.clone())
            .finish(&options.context);
        let payload = payload(Source::GoogleImages, ("query", image_url), options, context, call);
        self.client.dispatch(payload, call)
    }
}

#[cfg(test)]
mod tests {
    use oxyscrape_core::ScrapeError;
    use serde_json::json;

    use super::*;
    use crate::sources::capture::Capture;

    #[test]
    fn test_search_context_and_parsing_instructions() {
        let instructions = json!({
            "name": {"_fns": [{"_fn": "xpath_one", "_args": ["//h1"]}]}
        });
        let options = GoogleSearchOptions {
            domain: Some("co.uk".into()),
            parse: Some(true),
            parsing_instructions: Some(instructions.clone()),
            results_language: Some("en".into()),
            nfpr: Some(true),
            ..Default::default()
        };

        let body = Google::new(&Capture)
            .scrape_search("adidas", &options, &CallOptions::new())
            .unwrap();

        assert_eq!(
            body,
            json!({
                "source": "google_search",
                "query": "adidas",
                "domain": "co.uk",
                "parse": true,
                "parsing_instructions": instructions,
                "context": [
                    {"key": "results_language", "value": "en"},
                    {"key": "nfpr", "value": true}
                ]
            })
        );
    }

    #[test]
    fn test_malformed_parsing_instructions_rejected() {
        let options = GoogleSearchOptions {
            parsing_instructions: Some(json!(["not", "a", "mapping"])),
            ..Default::default()
        };
        let err = Google::new(&Capture)
            .scrape_search("adidas", &options, &CallOptions::new())
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidArgument(_)));
    }

    #[test]
    fn test_hotels_context() {
        let options = GoogleHotelsOptions {
            hotel_occupancy: Some(2),
            hotel_dates: Some("2026-11-01,2026-11-03".into()),
            ..Default::default()
        };
        let body = Google::new(&Capture)
            .scrape_travel_hotels("hotels in Paris", &options, &CallOptions::new())
            .unwrap();

        assert_eq!(body["source"], json!("google_travel_hotels"));
        assert_eq!(
            body["context"],
            json!([
                {"key": "hotel_occupancy", "value": 2},
                {"key": "hotel_dates", "value": "2026-11-01,2026-11-03"}
            ])
        );
    }

    #[test]
    fn test_other_entry_points() {
        let google = Google::new(&Capture);
        let call = CallOptions::new();

        let ads = google.scrape_ads("shoes", &GoogleSearchOptions::default(), &call).unwrap();
        let suggest = google
            .scrape_suggestions("sho", &GoogleSuggestOptions::default(), &call)
            .unwrap();
        let hotels = google
            .scrape_hotels("rome", &GoogleHotelsOptions::default(), &call)
            .unwrap();
        let images = google
            .scrape_images("https://ex.com/a.png", &GoogleImagesOptions::default(), &call)
            .unwrap();
        let url = google
            .scrape_url("https://www.google.com/search?q=x", &GoogleUrlOptions::default(), &call)
            .unwrap();

        assert_eq!(ads, json!({"source": "google_ads", "query": "shoes"}));
        assert_eq!(suggest, json!({"source": "google_suggest", "query": "sho"}));
        assert_eq!(hotels, json!({"source": "google_hotels", "query": "rome"}));
        assert_eq!(
            images,
            json!({"source": "google_images", "query": "https://ex.com/a.png"})
        );
        assert_eq!(
            url,
            json!({"source": "google", "url": "https://www.google.com/search?q=x"})
        );
    }
}
