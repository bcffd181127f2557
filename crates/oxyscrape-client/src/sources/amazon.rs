use oxyscrape_core::{ContextEntry, Source};
use serde::Serialize;
use serde_json::Value;

use super::{Context, Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

/// Options for paged Amazon listings: search, pricing, reviews and
/// bestsellers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AmazonSearchOptions {
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub geo_location: Option<String>,
    pub locale: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    #[serde(skip)]
    pub category_id: Option<String>,
    #[serde(skip)]
    pub merchant_id: Option<String>,
    #[serde(skip)]
    pub currency: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl AmazonSearchOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("category_id", self.category_id.clone())
            .with("merchant_id", self.merchant_id.clone())
            .with("currency", self.currency.clone())
            .finish(&self.context)
    }
}

/// Options for single-item Amazon pages: product, questions and sellers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AmazonProductOptions {
    pub domain: Option<String>,
    pub geo_location: Option<String>,
    pub locale: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    #[serde(skip)]
    pub autoselect_variant: Option<bool>,
    #[serde(skip)]
    pub currency: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl AmazonProductOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("autoselect_variant", self.autoselect_variant)
            .with("currency", self.currency.clone())
            .finish(&self.context)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AmazonUrlOptions {
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

pub struct Amazon<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Amazon<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &AmazonSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.listing(Source::AmazonSearch, ("query", query), options, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &AmazonUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Amazon, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    /// Product page by ASIN.
    pub fn scrape_product(
        &self,
        asin: &str,
        options: &AmazonProductOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.item(Source::AmazonProduct, ("query", asin), options, call)
    }

    /// Offer listing by ASIN.
    pub fn scrape_pricing(
        &self,
        asin: &str,
        options: &AmazonSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.listing(Source::AmazonPricing, ("query", asin), options, call)
    }

    pub fn scrape_reviews(
        &self,
        asin: &str,
        options: &AmazonSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.listing(Source::AmazonReviews, ("query", asin), options, call)
    }

    pub fn scrape_questions(
        &self,
        asin: &str,
        options: &AmazonProductOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.item(Source::AmazonQuestions, ("query", asin), options, call)
    }

    /// Bestseller lists; `query` is a department or browse node name.
    pub fn scrape_bestsellers(
        &self,
        query: &str,
        options: &AmazonSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.listing(Source::AmazonBestsellers, ("query", query), options, call)
    }

    pub fn scrape_sellers(
        &self,
        seller_id: &str,
        options: &AmazonProductOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        self.item(Source::AmazonSellers, ("query", seller_id), options, call)
    }

    fn listing(
        &self,
        source: Source,
        target: (&str, &str),
        options: &AmazonSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(source, target, options, options.context(), call);
        self.client.dispatch(payload, call)
    }

    fn item(
        &self,
        source: Source,
        target: (&str, &str),
        options: &AmazonProductOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(source, target, options, options.context(), call);
        self.client.dispatch(payload, call)
    }
}
