//! End-to-end test of the polling engine over real sockets.
//!
//! Drives a scheduler against the canned HTTP server and verifies the full
//! first cycle: fetch, handler execution, acknowledgment, state update. Only
//! the immediate first cycle is exercised; backoff timing is covered by the
//! virtual-time unit tests.

mod common;

use common::{CannedResponse, TestServer};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tether::command::handlers::NoopControl;
use tether::{AgentConfig, HttpCommandClient, PollPhase, PollScheduler, StatusSink};

struct RecordingSink {
    updates: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            updates: Mutex::new(Vec::new()),
        })
    }

    fn updates(&self) -> Vec<String> {
        self.updates.lock().unwrap().clone()
    }
}

impl StatusSink for RecordingSink {
    fn update(&self, status: &str) {
        self.updates.lock().unwrap().push(status.to_string());
    }
}

async fn wait_for(what: &str, cond: impl Fn() -> bool) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {}", what);
}

#[tokio::test]
async fn test_first_cycle_fetches_executes_and_acknowledges() {
    let server = TestServer::serve(vec![
        CannedResponse::ok(r#"{"commands": [{"id": "cmd-1", "type": "LOCK_DEVICE"}]}"#),
        CannedResponse::ok(""),
    ])
    .await;

    let config = AgentConfig {
        device_id: "dev-e2e".into(),
        server_url: server.base_url.clone(),
        ..Default::default()
    };
    let client = Arc::new(HttpCommandClient::new(&config).unwrap());
    let sink = RecordingSink::new();
    let scheduler = PollScheduler::new(&config, client, Arc::new(NoopControl), sink.clone());

    let mut handle = scheduler.start().await.unwrap();
    wait_for("fetch and acknowledgment", || server.requests().len() == 2).await;
    wait_for("connected status", || {
        sink.updates().last().map(String::as_str) == Some("Connected")
    })
    .await;

    let requests = server.requests();
    assert!(requests[0].starts_with("GET /check-commands/dev-e2e"));
    assert!(requests[1].starts_with("POST /acknowledge-command"));
    assert!(requests[1].contains("cmd-1"));

    assert_eq!(sink.updates(), vec!["Device locked", "Connected"]);
    let state = scheduler.snapshot().await;
    assert_eq!(state.consecutive_failures, 0);
    assert!(state.last_success.is_some());

    scheduler.stop().await;
    handle.join().await.unwrap();
}

#[tokio::test]
async fn test_first_cycle_failure_arms_backoff() {
    let server = TestServer::serve(vec![CannedResponse::status("404 Not Found")]).await;

    let config = AgentConfig {
        device_id: "dev-e2e".into(),
        server_url: server.base_url.clone(),
        ..Default::default()
    };
    let client = Arc::new(HttpCommandClient::new(&config).unwrap());
    let sink = RecordingSink::new();
    let scheduler = PollScheduler::new(&config, client, Arc::new(NoopControl), sink.clone());

    let mut handle = scheduler.start().await.unwrap();
    wait_for("retrying status", || {
        sink.updates().contains(&"Retrying connection...".to_string())
    })
    .await;

    let state = scheduler.snapshot().await;
    assert_eq!(state.consecutive_failures, 1);
    assert_eq!(state.phase(), PollPhase::Scheduled);
    assert!(state.last_success.is_none());

    scheduler.stop().await;
    handle.join().await.unwrap();
}
