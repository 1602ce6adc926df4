//! Common test utilities for E2E tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use actorlens::ProfileResolver;

/// Per-route request counters
#[derive(Default)]
pub struct Hits {
    pub alice: AtomicUsize,
    pub empty: AtomicUsize,
    pub broken: AtomicUsize,
    pub slow_started: AtomicUsize,
    pub slow_completed: AtomicUsize,
}

/// Local fixture server standing in for a remote ActivityPub instance
pub struct FixtureServer {
    pub origin: String,
    pub hits: Arc<Hits>,
}

#[derive(Clone)]
struct FixtureState {
    origin: String,
    hits: Arc<Hits>,
}

async fn alice(State(state): State<FixtureState>) -> Json<serde_json::Value> {
    state.hits.alice.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({
        "id": format!("{}/users/alice", state.origin),
        "preferredUsername": "alice",
        "name": "Alice",
        "summary": "<p>hi</p>",
        "icon": { "url": "https://example.com/a.png" }
    }))
}

async fn empty(State(state): State<FixtureState>) -> Json<serde_json::Value> {
    state.hits.empty.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({}))
}

async fn broken(State(state): State<FixtureState>) -> &'static str {
    state.hits.broken.fetch_add(1, Ordering::SeqCst);
    "<html>definitely not json</html>"
}

async fn slow(State(state): State<FixtureState>) -> Json<serde_json::Value> {
    state.hits.slow_started.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    state.hits.slow_completed.fetch_add(1, Ordering::SeqCst);
    Json(serde_json::json!({ "preferredUsername": "slow" }))
}

impl FixtureServer {
    /// Bind a fixture server on an OS-assigned port
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Hits::default());

        let state = FixtureState {
            origin: origin.clone(),
            hits: hits.clone(),
        };
        let app = Router::new()
            .route("/users/alice", get(alice))
            .route("/users/empty", get(empty))
            .route("/users/broken", get(broken))
            .route("/users/slow", get(slow))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { origin, hits }
    }

    /// Actor URL for one of the fixture users
    pub fn actor_url(&self, user: &str) -> String {
        format!("{}/users/{}", self.origin, user)
    }

    /// Resolver pointed at nothing in particular, with a short timeout
    pub fn resolver(&self) -> ProfileResolver {
        ProfileResolver::new(
            Arc::new(reqwest::Client::new()),
            Duration::from_secs(5),
        )
    }
}
