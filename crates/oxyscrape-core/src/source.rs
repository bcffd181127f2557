use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Closed set of scraping pipelines the service recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Amazon,
    AmazonSearch,
    AmazonProduct,
    AmazonPricing,
    AmazonReviews,
    AmazonQuestions,
    AmazonBestsellers,
    AmazonSellers,
    Bing,
    BingSearch,
    BingUrl,
    Google,
    GoogleSearch,
    GoogleUrl,
    GoogleAds,
    GoogleSuggest,
    GoogleHotels,
    GoogleTravelHotels,
    GoogleImages,
    GoogleShopping,
    GoogleShoppingSearch,
    GoogleShoppingUrl,
    GoogleShoppingProduct,
    GoogleShoppingPricing,
    Kroger,
    KrogerSearch,
    KrogerProduct,
    Universal,
    Wayfair,
    WayfairSearch,
    WayfairUrl,
    YoutubeTranscript,
    BaiduSearch,
    BaiduUrl,
    YandexSearch,
    YandexUrl,
}

impl Source {
    pub const ALL: [Source; 36] = [
        Source::Amazon,
        Source::AmazonSearch,
        Source::AmazonProduct,
        Source::AmazonPricing,
        Source::AmazonReviews,
        Source::AmazonQuestions,
        Source::AmazonBestsellers,
        Source::AmazonSellers,
        Source::Bing,
        Source::BingSearch,
        Source::BingUrl,
        Source::Google,
        Source::GoogleSearch,
        Source::GoogleUrl,
        Source::GoogleAds,
        Source::GoogleSuggest,
        Source::GoogleHotels,
        Source::GoogleTravelHotels,
        Source::GoogleImages,
        Source::GoogleShopping,
        Source::GoogleShoppingSearch,
        Source::GoogleShoppingUrl,
        Source::GoogleShoppingProduct,
        Source::GoogleShoppingPricing,
        Source::Kroger,
        Source::KrogerSearch,
        Source::KrogerProduct,
        Source::Universal,
        Source::Wayfair,
        Source::WayfairSearch,
        Source::WayfairUrl,
        Source::YoutubeTranscript,
        Source::BaiduSearch,
        Source::BaiduUrl,
        Source::YandexSearch,
        Source::YandexUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Amazon => "amazon",
            Source::AmazonSearch => "amazon_search",
            Source::AmazonProduct => "amazon_product",
            Source::AmazonPricing => "amazon_pricing",
            Source::AmazonReviews => "amazon_reviews",
            Source::AmazonQuestions => "amazon_questions",
            Source::AmazonBestsellers => "amazon_bestsellers",
            Source::AmazonSellers => "amazon_sellers",
            Source::Bing => "bing",
            Source::BingSearch => "bing_search",
            Source::BingUrl => "bing_url",
            Source::Google => "google",
            Source::GoogleSearch => "google_search",
            Source::GoogleUrl => "google_url",
            Source::GoogleAds => "google_ads",
            Source::GoogleSuggest => "google_suggest",
            Source::GoogleHotels => "google_hotels",
            Source::GoogleTravelHotels => "google_travel_hotels",
            Source::GoogleImages => "google_images",
            Source::GoogleShopping => "google_shopping",
            Source::GoogleShoppingSearch => "google_shopping_search",
            Source::GoogleShoppingUrl => "google_shopping_url",
            Source::GoogleShoppingProduct => "google_shopping_product",
            Source::GoogleShoppingPricing => "google_shopping_pricing",
            Source::Kroger => "kroger",
            Source::KrogerSearch => "kroger_search",
            Source::KrogerProduct => "kroger_product",
            Source::Universal => "universal",
            Source::Wayfair => "wayfair",
            Source::WayfairSearch => "wayfair_search",
            Source::WayfairUrl => "wayfair_url",
            Source::YoutubeTranscript => "youtube_transcript",
            Source::BaiduSearch => "baidu_search",
            Source::BaiduUrl => "baidu_url",
            Source::YandexSearch => "yandex_search",
            Source::YandexUrl => "yandex_url",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Source {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| ScrapeError::invalid(format!("Unknown source: {s}")))
    }
}
