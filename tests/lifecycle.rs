//! Integration tests for fill polling against a scripted mock exchange

mod common;

use std::time::{Duration, Instant};

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backpack_maker::{wait_for_fill, ClientError, FillOutcome, PollOptions};

use common::signed_client;

fn fast_opts() -> PollOptions {
    PollOptions {
        interval: Duration::from_millis(50),
        timeout: Duration::from_secs(5),
    }
}

#[test_log::test(tokio::test)]
async fn test_polls_until_order_leaves_the_book() {
    let server = MockServer::start().await;

    // Three pending responses, then the order is gone
    Mock::given(method("GET"))
        .and(path("/order"))
        .and(query_param("instruction", "orderQuery"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "1", "status": "New"})))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/order"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = signed_client(&server.uri());
    let cancel = CancellationToken::new();

    let started = Instant::now();
    let outcome = wait_for_fill(&client, 0, "SOL_USDC", &fast_opts(), &cancel)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome, FillOutcome::Confirmed);

    // Exactly four queries, spaced by the poll interval
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(
        elapsed >= Duration::from_millis(150),
        "Expected three sleeps between four polls, elapsed {:?}",
        elapsed
    );
}

#[test_log::test(tokio::test)]
async fn test_immediate_fill_polls_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = signed_client(&server.uri());
    let outcome = wait_for_fill(&client, 0, "SOL_USDC", &fast_opts(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, FillOutcome::Confirmed);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_deadline_surfaces_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "1"})))
        .mount(&server)
        .await;

    let client = signed_client(&server.uri());
    let opts = PollOptions {
        interval: Duration::from_millis(50),
        timeout: Duration::from_millis(120),
    };

    let outcome = wait_for_fill(&client, 0, "SOL_USDC", &opts, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, FillOutcome::TimedOut);
    // The order was queried at least once before giving up
    assert!(!server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_cancellation_interrupts_the_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "1"})))
        .mount(&server)
        .await;

    let client = signed_client(&server.uri());
    let opts = PollOptions {
        interval: Duration::from_secs(30),
        timeout: Duration::from_secs(300),
    };
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = wait_for_fill(&client, 0, "SOL_USDC", &opts, &cancel)
        .await
        .unwrap();

    assert_eq!(outcome, FillOutcome::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test_log::test(tokio::test)]
async fn test_transport_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order"))
        .respond_with(ResponseTemplate::new(500).set_body_string("exchange melted"))
        .mount(&server)
        .await;

    let client = signed_client(&server.uri());
    let result = wait_for_fill(
        &client,
        0,
        "SOL_USDC",
        &fast_opts(),
        &CancellationToken::new(),
    )
    .await;

    assert!(matches!(
        result,
        Err(ClientError::UnexpectedStatus { status: 500, .. })
    ));
}
