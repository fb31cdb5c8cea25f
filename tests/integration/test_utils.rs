//! Test utilities for integration tests.
//!
//! Helpers for building requests against the router and decoding JSON
//! responses.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use item_echo::{create_router, RouterConfig};

/// Router with tracing disabled, as used by every test.
pub fn test_router() -> Router {
    create_router(RouterConfig::new().with_tracing(false))
}

/// Send a request and decode the JSON response body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}

/// `GET uri` against a fresh router.
pub async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(test_router(), request).await
}

/// Send a JSON body with the given method against a fresh router.
pub async fn send_json(method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
    send_raw(method, uri, serde_json::to_vec(body).unwrap()).await
}

/// Send raw body bytes as JSON with the given method against a fresh router.
pub async fn send_raw(method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(test_router(), request).await
}

/// `(dotted loc, type)` for every entry of a 422 `detail` list.
pub fn error_summary(body: &Value) -> Vec<(String, String)> {
    body["detail"]
        .as_array()
        .expect("response should carry a detail list")
        .iter()
        .map(|entry| {
            let loc = entry["loc"]
                .as_array()
                .unwrap()
                .iter()
                .map(|part| part.as_str().unwrap().to_string())
                .collect::<Vec<_>>()
                .join(".");
            (loc, entry["type"].as_str().unwrap().to_string())
        })
        .collect()
}

/// Shorthand for building an expected [`error_summary`].
pub fn expected(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(loc, kind)| (loc.to_string(), kind.to_string()))
        .collect()
}
