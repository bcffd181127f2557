use oxyscrape_core::Source;
use serde::Serialize;
use serde_json::Value;

use super::{Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Default, Serialize)]
pub struct YandexSearchOptions {
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
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct YandexUrlOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parsing_instructions: Option<Value>,
}

pub struct Yandex<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Yandex<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &YandexSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::YandexSearch, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &YandexUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::YandexUrl, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }
}
