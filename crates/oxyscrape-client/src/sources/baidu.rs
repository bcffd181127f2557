use oxyscrape_core::Source;
use serde::Serialize;
use serde_json::Value;

use super::{UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BaiduSearchOptions {
    /// `com` or `cn`.
    pub domain: Option<String>,
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub user_agent_type: Option<UserAgentType>,
    pub callback_url: Option<String>,
    pub parsing_instructions: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BaiduUrlOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub callback_url: Option<String>,
    pub parsing_instructions: Option<Value>,
}

pub struct Baidu<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Baidu<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &BaiduSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::BaiduSearch, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &BaiduUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::BaiduUrl, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }
}
