use super::{Amazon, Baidu, Bing, Google, GoogleShopping, Kroger, Wayfair, Yandex};
use crate::client::Dispatch;

/// Search engine facades, grouped.
pub struct Serp<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Serp<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn google(&self) -> Google<'c, D> {
        Google::new(self.client)
    }

    pub fn bing(&self) -> Bing<'c, D> {
        Bing::new(self.client)
    }

    pub fn baidu(&self) -> Baidu<'c, D> {
        Baidu::new(self.client)
    }

    pub fn yandex(&self) -> Yandex<'c, D> {
        Yandex::new(self.client)
    }
}

/// Online store facades, grouped.
pub struct Ecommerce<'c, D> {
    client: &'c D,
}

impl<'c, D: Dispatch> Ecommerce<'c, D> {
    pub(crate) fn new(client: &'c D) -> Self {
        Self { client }
    }

    pub fn amazon(&self) -> Amazon<'c, D> {
        Amazon::new(self.client)
    }

    pub fn google_shopping(&self) -> GoogleShopping<'c, D> {
        GoogleShopping::new(self.client)
    }

    pub fn kroger(&self) -> Kroger<'c, D> {
        Kroger::new(self.client)
    }

    pub fn wayfair(&self) -> Wayfair<'c, D> {
        Wayfair::new(self.client)
    }
}
