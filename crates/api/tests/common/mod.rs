use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tower::ServiceExt;

use barberbook_api::config::ServerConfig;
use barberbook_api::router::build_app_router;
use barberbook_api::state::AppState;
use barberbook_core::catalog::Catalog;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog_path: "unused-in-tests".to_string(),
        owner_whatsapp: "+33600000000".to_string(),
    }
}

/// The catalog every integration test runs against.
///
/// Ayoub works Monday-Friday 10:00-19:00 (Saturday 11:00-17:00) with a
/// 13:30-14:00 break; no staff works Sunday.
pub fn test_catalog() -> Catalog {
    Catalog::from_json_str(
        r#"{
            "services": [
                { "id": "cut", "name": "Haircut", "duration_min": 30, "price_cents": 2000, "deposit_cents": 500 },
                { "id": "beard", "name": "Beard trim", "duration_min": 20, "price_cents": 1200, "deposit_cents": 400 },
                { "id": "combo", "name": "Haircut + beard", "duration_min": 45, "price_cents": 3000, "deposit_cents": 800 }
            ],
            "staff": [
                {
                    "id": "ayoub",
                    "name": "Ayoub",
                    "city": "Paris 11",
                    "working_hours": {
                        "1": { "start": "10:00", "end": "19:00" },
                        "2": { "start": "10:00", "end": "19:00" },
                        "3": { "start": "10:00", "end": "19:00" },
                        "4": { "start": "10:00", "end": "19:00" },
                        "5": { "start": "10:00", "end": "19:00" },
                        "6": { "start": "11:00", "end": "17:00" }
                    },
                    "breaks": [ { "start": "13:30", "end": "14:00" } ]
                },
                {
                    "id": "moussa",
                    "name": "Moussa",
                    "city": "Paris 15",
                    "working_hours": {
                        "1": { "start": "09:30", "end": "18:30" }
                    },
                    "breaks": [ { "start": "12:45", "end": "13:15" } ]
                }
            ]
        }"#,
    )
    .expect("test catalog must be valid")
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        catalog: Arc::new(test_catalog()),
        sessions: Arc::new(RwLock::new(HashMap::new())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body against the app.
///
/// Takes `&Router` so a flow test can send a sequence of requests through
/// the same app (and therefore the same session store).
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Issue a POST request with an empty body against the app.
pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
