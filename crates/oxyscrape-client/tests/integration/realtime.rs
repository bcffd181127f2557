use oxyscrape_client::{BingSearchOptions, CallOptions, GoogleSearchOptions, USER_AGENT};
use oxyscrape_core::ScrapeError;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{BlockingServer, basic_auth};

fn nike() -> BingSearchOptions {
    BingSearchOptions {
        domain: Some("com".into()),
        limit: Some(10),
        ..Default::default()
    }
}

fn ok_results() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"results": [{"content": "X"}]}))
}

#[test]
fn bing_search_posts_exact_payload() {
    let server = BlockingServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/v1/queries"))
            .and(header("authorization", basic_auth().as_str()))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ok_results()),
    );

    let response = server
        .client()
        .bing()
        .scrape_search("nike", &nike(), &CallOptions::new())
        .unwrap();

    assert_eq!(response.raw(), &json!({"results": [{"content": "X"}]}));
    assert_eq!(response.results(), &[json!({"content": "X"})]);

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        String::from_utf8(received[0].body.clone()).unwrap(),
        r#"{"source":"bing_search","query":"nike","domain":"com","limit":10}"#
    );
}

#[test]
fn unauthorized_is_client_error_without_retry() {
    let server = BlockingServer::start();
    server.mount(
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "unauthorized"})),
            ),
    );

    let err = server
        .client()
        .bing()
        .scrape_search("nike", &nike(), &CallOptions::new())
        .unwrap_err();

    assert_eq!(
        err,
        ScrapeError::ClientError {
            status: 401,
            message: "unauthorized".into()
        }
    );
    assert_eq!(server.received().len(), 1);
}

#[test]
fn rate_limit_is_transient_error() {
    let server = BlockingServer::start();
    server.mount(Mock::given(method("POST")).respond_with(ResponseTemplate::new(429)));

    let err = server
        .client()
        .bing()
        .scrape_search("nike", &nike(), &CallOptions::new())
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(server.received().len(), 1);
}

#[test]
fn extras_override_and_source_guard() {
    let server = BlockingServer::start();
    server.mount(
        Mock::given(method("POST"))
            .and(body_json(json!({"source": "bing_search", "query": "x", "limit": 50})))
            .respond_with(ok_results()),
    );
    let client = server.client();
    let options = BingSearchOptions {
        limit: Some(10),
        ..Default::default()
    };

    let response = client
        .bing()
        .scrape_search("x", &options, &CallOptions::new().with_extra("limit", 50))
        .unwrap();
    assert_eq!(response.results().len(), 1);

    let err = client
        .bing()
        .scrape_search("x", &options, &CallOptions::new().with_extra("source", "other"))
        .unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidArgument(_)));
    assert_eq!(server.received().len(), 1);
}

#[test]
fn parsing_instructions_sent_unchanged_or_rejected_locally() {
    let server = BlockingServer::start();
    server.mount(Mock::given(method("POST")).respond_with(ok_results()));
    let client = server.client();

    let instructions = json!({"name": {"_fns": [{"_fn": "xpath_one", "_args": ["//h1"]}]}});
    let options = GoogleSearchOptions {
        parse: Some(true),
        parsing_instructions: Some(instructions.clone()),
        ..Default::default()
    };
    client
        .google()
        .scrape_search("adidas", &options, &CallOptions::new())
        .unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["parsing_instructions"], instructions);

    let options = GoogleSearchOptions {
        parsing_instructions: Some(json!("//h1")),
        ..Default::default()
    };
    let err = client
        .google()
        .scrape_search("adidas", &options, &CallOptions::new())
        .unwrap_err();

    assert!(matches!(err, ScrapeError::InvalidArgument(_)));
    assert_eq!(server.received().len(), 1);
}
