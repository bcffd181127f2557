use oxyscrape_core::Source;
use serde::Serialize;
use serde_json::Value;

use super::{Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BingSearchOptions {
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub locale: Option<String>,
    pub geo_location: Option<String>,
    pub user_agent_type: Option<UserAgentType>,
    pub callback_url: Option<String>,
    pub render: Option<Render>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BingUrlOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub geo_location: Option<String>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
}

/// Bing search result pages.
pub struct Bing<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Bing<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &BingSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::BingSearch, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &BingUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Bing, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }
}
