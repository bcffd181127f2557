use std::time::{Duration, Instant};

use oxyscrape_client::{CallOptions, Render, UniversalOptions};
use oxyscrape_core::ScrapeError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{async_client, basic_auth};

fn universal() -> UniversalOptions {
    UniversalOptions {
        render: Some(Render::Html),
        ..Default::default()
    }
}

async fn mount_submission(server: &MockServer) {
    let base = format!("{}/v1/queries/J", server.uri());
    Mock::given(method("POST"))
        .and(path("/v1/queries"))
        .and(header("authorization", basic_auth().as_str()))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "J",
            "status": "pending",
            "_links": [
                {"rel": "self", "href": base, "method": "GET"},
                {"rel": "results", "href": format!("{base}/results"), "method": "GET"}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn count(requests: &[wiremock::Request], verb: &str, route: &str) -> usize {
    requests
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .count()
}

#[tokio::test]
async fn universal_job_polls_then_fetches() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J/results"))
        .and(header("authorization", basic_auth().as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [{"ok": true}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let call = CallOptions::new()
        .with_poll_interval(Duration::from_secs(1))
        .with_job_completion_timeout(Duration::from_secs(5));
    let response = async_client(&server)
        .universal()
        .scrape_url("https://ex.com", &universal(), &call)
        .await
        .unwrap();

    assert_eq!(response.results(), &[json!({"ok": true})]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(count(&requests, "POST", "/v1/queries"), 1);
    assert!(count(&requests, "GET", "/v1/queries/J") >= 2);
    assert_eq!(count(&requests, "GET", "/v1/queries/J/results"), 1);

    let submitted: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        submitted,
        json!({"source": "universal", "url": "https://ex.com", "render": "html"})
    );
}

#[tokio::test]
async fn pending_forever_times_out_with_job_id() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .mount(&server)
        .await;

    let request_timeout = Duration::from_secs(10);
    let call = CallOptions::new()
        .with_request_timeout(request_timeout)
        .with_poll_interval(Duration::from_secs(1))
        .with_job_completion_timeout(Duration::from_secs(3));

    let started = Instant::now();
    let err = async_client(&server)
        .universal()
        .scrape_url("https://ex.com", &universal(), &call)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ScrapeError::Timeout { .. }));
    assert_eq!(err.job_id(), Some("J"));
    assert!(elapsed >= Duration::from_secs(3), "elapsed {elapsed:?}");
    assert!(elapsed <= Duration::from_secs(3) + request_timeout, "elapsed {elapsed:?}");

    let requests = server.received_requests().await.unwrap();
    // One status GET per interval up to and including the deadline.
    assert_eq!(count(&requests, "GET", "/v1/queries/J"), 3);
    assert_eq!(count(&requests, "GET", "/v1/queries/J/results"), 0);
}

#[tokio::test]
async fn poll_interval_equal_to_completion_timeout_still_polls() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J/results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [{"ok": true}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let call = CallOptions::new()
        .with_poll_interval(Duration::from_secs(2))
        .with_job_completion_timeout(Duration::from_secs(2));
    let response = async_client(&server)
        .universal()
        .scrape_url("https://ex.com", &universal(), &call)
        .await
        .unwrap();

    assert_eq!(response.results(), &[json!({"ok": true})]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(count(&requests, "GET", "/v1/queries/J"), 1);
    assert_eq!(count(&requests, "GET", "/v1/queries/J/results"), 1);
}

#[tokio::test]
async fn faulted_job_is_service_error() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "faulted", "message": "target unreachable"})),
        )
        .mount(&server)
        .await;

    let call = CallOptions::new()
        .with_poll_interval(Duration::from_secs(1))
        .with_job_completion_timeout(Duration::from_secs(5));
    let err = async_client(&server)
        .universal()
        .scrape_url("https://ex.com", &universal(), &call)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::ServiceError { .. }));
    assert_eq!(err.job_id(), Some("J"));
}

#[tokio::test]
async fn status_not_found_is_absorbed_until_done() {
    let server = MockServer::start().await;
    mount_submission(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/queries/J/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let call = CallOptions::new()
        .with_poll_interval(Duration::from_secs(1))
        .with_job_completion_timeout(Duration::from_secs(5));
    let response = async_client(&server)
        .universal()
        .scrape_url("https://ex.com", &universal(), &call)
        .await
        .unwrap();

    assert!(response.results().is_empty());
}
