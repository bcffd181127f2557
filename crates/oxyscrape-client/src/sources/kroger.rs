use oxyscrape_core::Source;
use serde::Serialize;
use serde_json::Value;

use super::{Render, UserAgentType, payload};
use crate::client::{CallOptions, Dispatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    Pickup,
    Delivery,
    InStore,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KrogerSearchOptions {
    pub start_page: Option<u32>,
    pub pages: Option<u32>,
    pub limit: Option<u32>,
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    /// Prices and availability are store-specific.
    pub store_id: Option<u64>,
    pub delivery_zip: Option<String>,
    pub fulfillment_type: Option<FulfillmentType>,
}

/// Options for Kroger product and URL scrapes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KrogerOptions {
    pub user_agent_type: Option<UserAgentType>,
    pub render: Option<Render>,
    pub callback_url: Option<String>,
    pub parse: Option<bool>,
    pub parsing_instructions: Option<Value>,
    pub store_id: Option<u64>,
    pub delivery_zip: Option<String>,
    pub fulfillment_type: Option<FulfillmentType>,
}

pub struct Kroger<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Kroger<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn scrape_search(
        &self,
        query: &str,
        options: &KrogerSearchOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::KrogerSearch, ("query", query), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }

    pub fn scrape_product(
        &self,
        product_id: &str,
        options: &KrogerOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(
            Source::KrogerProduct,
            ("product_id", product_id),
            options,
            Vec::new(),
            call,
        );
        self.client.dispatch(payload, call)
    }

    pub fn scrape_url(
        &self,
        url: &str,
        options: &KrogerOptions,
        call: &CallOptions,
    ) -> D::Output<'c> {
        let payload = payload(Source::Kroger, ("url", url), options, Vec::new(), call);
        self.client.dispatch(payload, call)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sources::capture::Capture;

    #[test]
    fn test_store_fields_are_top_level() {
        let options = KrogerSearchOptions {
            store_id: Some(539),
            delivery_zip: Some("45202".into()),
            fulfillment_type: Some(FulfillmentType::InStore),
            ..Default::default()
        };
        let body = Kroger::new(&Capture)
            .scrape_search("milk", &options, &CallOptions::new())
            .unwrap();

        assert_eq!(
            body,
            json!({
                "source": "kroger_search",
                "query": "milk",
                "store_id": 539,
                "delivery_zip": "45202",
                "fulfillment_type": "in_store"
            })
        );
    }

    #[test]
    fn test_product_uses_product_id() {
        let kroger = Kroger::new(&Capture);
        let call = CallOptions::new();

        let product = kroger
            .scrape_product("0001111041700", &KrogerOptions::default(), &call)
            .unwrap();
        let url = kroger
            .scrape_url("https://www.kroger.com/p/x", &KrogerOptions::default(), &call)
            .unwrap();

        assert_eq!(
            product,
            json!({"source": "kroger_product", "product_id": "0001111041700"})
        );
        assert_eq!(url, json!({"source": "kroger", "url": "https://www.kroger.com/p/x"}));
    }
}
