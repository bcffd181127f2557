use oxyscrape_core::{ContextEntry, Source};
use serde::Serialize;
use serde_json::Value;

use super::{ContentEncoding, Context, Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

/// Options for scraping an arbitrary URL.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UniversalOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub geo_location: Option<String>,
    pub locale: Option<String>,
    pub render: Option<Render>,
    pub content_encoding: Option<ContentEncoding>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    /// Dedicated parser to apply, e.g. `ecommerce_product`.
    pub parser_type: Option<String>,
    pub parsing_instructions: Option<Value>,
    /// Page interactions run before capture when `render` is set.
    pub browser_instructions: Option<Value>,
    #[serde(skip)]
    pub follow_redirects: Option<bool>,
    /// Codes the service should treat as success, e.g. `[200, 404]`.
    #[serde(skip)]
    pub successful_status_codes: Option<Vec<u16>>,
    #[serde(skip)]
    pub http_method: Option<String>,
    /// Base64 request body, used with `http_method = "post"`.
    #[serde(skip)]
    pub content: Option<String>,
    #[serde(skip)]
    pub context: Vec<ContextEntry>,
}

impl UniversalOptions {
    fn context(&self) -> Vec<ContextEntry> {
        Context::new()
            .with("follow_redirects", self.follow_redirects)
            .with("successful_status_codes", self.successful_status_codes.clone())
            .with("http_method", self.http_method.clone())
            .with("content", self.content.clone())
            .finish(&self.context)
    }
}

pub struct Universal<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Universal<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &UniversalOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Universal, ("url", url), options, options.context(), call);
        self.client.dispatch(payload, call)
    }
}
