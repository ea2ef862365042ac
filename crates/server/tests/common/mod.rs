//! Common test utilities for API testing.
//!
//! This module provides a test fixture that builds the full router in
//! process, backed by a deterministic player pool, so the REST surface can
//! be exercised without binding a port.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use draftroom_core::{Config, Player};
use draftroom_server::state::AppState;

/// Re-export fixtures for test convenience
pub use draftroom_core::testing::fixtures;

/// Test fixture for in-process API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_start() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/draft/start", json!({ "seconds_per_pick": 30 })).await;
///
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Default league over a pool of 2 catchers, 5 infielders, 4 outfielders
    /// and 4 pitchers.
    pub fn new() -> Self {
        Self::with_players(fixtures::player_pool(2, 5, 4, 4))
    }

    /// Default league over the given players.
    pub fn with_players(players: Vec<Player>) -> Self {
        let state = Arc::new(AppState::build(Config::default(), players));
        let router = draftroom_server::api::create_router(Arc::clone(&state));
        Self { router, state }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
