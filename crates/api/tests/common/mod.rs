#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use printquote_api::auth::jwt::{generate_access_token, JwtConfig};
use printquote_api::config::ServerConfig;
use printquote_api::routes;
use printquote_api::state::AppState;
use printquote_gateway::testing::{FakeAssetStore, FakePaymentProcessor};

pub const CUSTOMER_ID: i64 = 101;
pub const OTHER_CUSTOMER_ID: i64 = 202;
pub const STAFF_ID: i64 = 7;

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        asset_url_ttl_secs: 900,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The router plus handles on the fakes behind it.
pub struct TestApp {
    pub router: Router,
    pub processor: Arc<FakePaymentProcessor>,
    pub store: Arc<FakeAssetStore>,
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so tests exercise the same
/// middleware stack production uses, with in-memory payment and asset fakes.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let processor = Arc::new(FakePaymentProcessor::new());
    let store = Arc::new(FakeAssetStore::new());
    let state = AppState::new(pool, test_config(), processor.clone(), store.clone());

    let cors = CorsLayer::new()
        .allow_origin([HeaderValue::from_static("http://localhost:5173")])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    TestApp {
        router,
        processor,
        store,
    }
}

/// Mint a bearer token for `user_id` with `role`.
pub fn token(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn customer_token() -> String {
    token(CUSTOMER_ID, "customer")
}

pub fn staff_token() -> String {
    token(STAFF_ID, "staff")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::POST, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, token, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Submit a design request as [`CUSTOMER_ID`] and return its id.
pub async fn submit_request(app: &Router) -> i64 {
    let response = post_json(
        app,
        "/api/v1/customer/design-requests",
        Some(&customer_token()),
        serde_json::json!({
            "asset_key": "uploads/101/flyer.pdf",
            "asset_name": "flyer.pdf",
            "quantity": 200,
            "size": "A5"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Quote `amount` as staff.
pub async fn quote(app: &Router, id: i64, amount: i64) -> Response {
    post_json(
        app,
        &format!("/api/v1/admin/design-requests/{id}/quote"),
        Some(&staff_token()),
        serde_json::json!({ "amount": amount }),
    )
    .await
}
