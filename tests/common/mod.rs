#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;
use widget_backend::config::Config;
use widget_backend::routes::create_router;
use widget_backend::services::credential_store::CredentialStore;
use widget_backend::services::inference::InferenceBackend;
use widget_backend::state::{AppState, SharedState};

/// What a stub backend does when called.
#[derive(Clone)]
pub enum Canned {
    Reply(&'static str),
    Empty,
    Fail(&'static str),
}

pub struct StubBackend {
    name: &'static str,
    canned: Canned,
    calls: AtomicUsize,
    last_message: Mutex<Option<String>>,
}

impl StubBackend {
    pub fn new(name: &'static str, canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            name,
            canned,
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<String> {
        self.last_message.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for StubBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn chat(&self, message: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = Some(message.to_string());
        match &self.canned {
            Canned::Reply(text) => Ok(Some(text.to_string())),
            Canned::Empty => Ok(None),
            Canned::Fail(msg) => Err(anyhow!(*msg)),
        }
    }
}

pub fn config(pairs: &[(&str, &str)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn customers() -> CredentialStore {
    [("cust1", "key1"), ("cust2", "key2")].into_iter().collect()
}

pub fn state_with(
    pairs: &[(&str, &str)],
    local: Arc<StubBackend>,
    remote: Arc<StubBackend>,
) -> SharedState {
    Arc::new(AppState::new(config(pairs), customers(), local, remote))
}

pub fn stub_state(pairs: &[(&str, &str)], reply: &'static str) -> SharedState {
    state_with(
        pairs,
        StubBackend::new("local-stub", Canned::Reply(reply)),
        StubBackend::new("remote-stub", Canned::Fail("remote should not be called")),
    )
}

pub async fn post_message(state: SharedState, body: &str) -> (StatusCode, serde_json::Value) {
    post_message_to(state, "/api/send-message", body).await
}

pub async fn post_message_to(
    state: SharedState,
    uri: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let app = create_router().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}
