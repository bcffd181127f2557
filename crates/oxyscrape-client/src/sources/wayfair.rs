use oxyscrape_core::Source;
use serde::Serialize;

use super::{UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Default, Serialize)]
pub struct WayfairSearchOptions {
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub user_agent_type: Option<UserAgentType>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WayfairUrlOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub callback_url: Option<String>,
}

pub struct Wayfair<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Wayfair<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &WayfairSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::WayfairSearch, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &WayfairUrlOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Wayfair, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }
}
