// SPDX-License-Identifier: MIT

//! Shared test harness: in-memory app builder and a mock point-card
//! upstream with request counting.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use fansite_api::config::Config;
use fansite_api::db::Db;
use fansite_api::middleware::auth::create_session_jwt;
use fansite_api::routes::create_router;
use fansite_api::services::PointCardService;
use fansite_api::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Create a test app backed by an in-memory database.
///
/// `function_url` points the point-card service at a mock upstream (or a
/// dead address when the test never reaches the network); `api_key: None`
/// simulates the missing-secret deployment.
#[allow(dead_code)]
pub async fn create_test_app_with(
    function_url: &str,
    api_key: Option<&str>,
) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.point_card_function_url = function_url.to_string();
    config.point_card_api_key = api_key.map(|k| k.to_string());

    let db = Db::new_in_memory().await.expect("in-memory db");
    let point_card = PointCardService::new(
        config.point_card_function_url.clone(),
        config.point_card_api_key.clone(),
        db.clone(),
    );

    let state = Arc::new(AppState {
        config,
        db,
        point_card,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with default config (dead upstream address).
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with("http://127.0.0.1:9/link-profile", Some("test_api_key")).await
}

/// Mint a session token the way the auth provider would.
#[allow(dead_code)]
pub fn session_token(user_id: &str) -> String {
    let config = Config::test_default();
    create_session_jwt(user_id, Some("fan@example.com"), &config.session_jwt_secret)
        .expect("session jwt")
}

/// Build an authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, user_id: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", session_token(user_id)))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build an authenticated request with no body.
#[allow(dead_code)]
pub fn bare_request(method: &str, uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", session_token(user_id)))
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ─── Mock point-card upstream ────────────────────────────────

/// A stand-in for the point-card edge function: serves a canned
/// (status, body) response and counts requests, so tests can assert that
/// configuration errors never reach the network.
#[allow(dead_code)]
pub struct MockLoyalty {
    pub url: String,
    hits: Arc<AtomicUsize>,
    response: Arc<Mutex<(u16, serde_json::Value)>>,
    last_request: Arc<Mutex<Option<serde_json::Value>>>,
    last_api_key: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockLoyalty {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_response(&self, status: u16, body: serde_json::Value) {
        *self.response.lock().unwrap() = (status, body);
    }

    /// Body of the most recent request, for asserting the outbound shape.
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.last_request.lock().unwrap().clone()
    }

    /// `x-api-key` header of the most recent request.
    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }
}

/// Spawn the mock upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_mock_loyalty(status: u16, body: serde_json::Value) -> MockLoyalty {
    let hits = Arc::new(AtomicUsize::new(0));
    let response = Arc::new(Mutex::new((status, body)));
    let last_request = Arc::new(Mutex::new(None));
    let last_api_key = Arc::new(Mutex::new(None));

    let hits_handler = hits.clone();
    let response_handler = response.clone();
    let last_request_handler = last_request.clone();
    let last_api_key_handler = last_api_key.clone();

    let app = Router::new().route(
        "/link-profile",
        post(
            move |headers: axum::http::HeaderMap, Json(request): Json<serde_json::Value>| {
                let hits = hits_handler.clone();
                let response = response_handler.clone();
                let last_request = last_request_handler.clone();
                let last_api_key = last_api_key_handler.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    *last_request.lock().unwrap() = Some(request);
                    *last_api_key.lock().unwrap() = headers
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.to_string());
                    let (status, body) = response.lock().unwrap().clone();
                    (StatusCode::from_u16(status).unwrap(), Json(body))
                }
            },
        ),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockLoyalty {
        url: format!("http://{}/link-profile", addr),
        hits,
        response,
        last_request,
        last_api_key,
    }
}
