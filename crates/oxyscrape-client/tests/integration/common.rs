use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use oxyscrape_client::{AsyncClient, Client, ClientBuilder};
use oxyscrape_core::Credentials;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const USER: &str = "user";
pub const PASS: &str = "pass";

pub fn basic_auth() -> String {
    format!("Basic {}", STANDARD.encode(format!("{USER}:{PASS}")))
}

pub fn credentials() -> Credentials {
    Credentials::new(USER, PASS).unwrap()
}

pub fn async_client(server: &MockServer) -> AsyncClient {
    ClientBuilder::new()
        .credentials(credentials())
        .async_url(format!("{}/v1/queries", server.uri()))
        .build_async()
        .unwrap()
}

/// Mock server for blocking tests: it runs on its own runtime so the
/// client can block the test thread.
pub struct BlockingServer {
    pub server: MockServer,
    runtime: Runtime,
}

impl BlockingServer {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn client(&self) -> Client {
        ClientBuilder::new()
            .credentials(credentials())
            .realtime_url(format!("{}/v1/queries", self.server.uri()))
            .build()
            .unwrap()
    }
}
