use oxyscrape_core::{ContextEntry, Source};
use serde::Serialize;
use serde_json::Value;

use super::{Context, Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleShoppingSearchOptions {
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
    /// `r` relevance, `rv` reviews, `p` price ascending, `pd` price descending.
    #[serde(skip)]
    pub sort_by: Option<String>,
    #[serde(skip)]
    pub min_price: Option<u32>,
    #[serde(skip)]
    pub max_price: Option<u32>,
    #[serde(skip)]
    pub nfpr: Option<bool>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl GoogleShoppingSearchOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("results_language", self.results_language.clone())
            .with("sort_by", self.sort_by.clone())
            .with("min_price", self.min_price)
            .with("max_price", self.max_price)
            .with("nfpr", self.nfpr)
            .finish(&self.context)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleShoppingUrlOptions {
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleShoppingProductOptions {
    pub domain: Option<String>,
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleShoppingPricingOptions {
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
}

pub struct GoogleShopping<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> GoogleShopping<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_shopping_search(
        &self,
        query: &str,
        options: &GoogleShoppingSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleShoppingSearch,
            ("query", query),
            options,
            options.context(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    pub fn scrape_shopping_url(
        &self,
        url: &str,
        options: &GoogleShoppingUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::GoogleShopping, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    /// Product page by Google Shopping product id.
    pub fn scrape_shopping_products(
        &self,
        product_id: &str,
        options: &GoogleShoppingProductOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleShoppingProduct,
            ("query", product_id),
            options,
            Vec::new(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    /// Seller offers for a product id.
    pub fn scrape_product_pricing(
        &self,
        product_id: &str,
        options: &GoogleShoppingPricingOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::GoogleShoppingPricing,
            ("query", product_id),
            options,
            Vec::new(),
            call,
        );
        self.client.dispatch(payload, call)
    }
}
