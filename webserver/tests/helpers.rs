//! Test helper utilities for webserver integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use registry::{InMemoryTuitionStore, TuitionRegistry, TuitionStore};
use serde_json::Value;
use shared::NewTuition;
use tower::ServiceExt;
use webserver::WebServer;

/// Create a test bind address
pub fn create_test_address() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

/// Build a router over `store` with default registry settings
pub fn router_for<S: TuitionStore + 'static>(store: S) -> Router {
    let registry = TuitionRegistry::with_defaults(Arc::new(store));
    WebServer::new(create_test_address(), registry).build_router()
}

/// Build a router over an empty in-memory store
pub fn create_test_router() -> Router {
    router_for(InMemoryTuitionStore::new())
}

/// A valid tuition request
pub fn sample_request() -> NewTuition {
    NewTuition {
        guardian_name: "Farhana Islam".to_string(),
        guardian_phone: "01933333333".to_string(),
        student_class: "Class 5".to_string(),
        subjects: vec!["Bangla".to_string(), "Math".to_string()],
        location: "Banani".to_string(),
        salary: Some(4000),
        days_per_week: Some(5),
        notes: None,
        requested_code: None,
    }
}

/// Send a request through the router and decode the JSON response body
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let raw = body.map(|json| serde_json::to_string(&json).unwrap());
    send_raw(router, method, uri, raw.as_deref()).await
}

/// Like [`send`] but with the request body given verbatim as JSON text
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(text) => builder
            .header("content-type", "application/json")
            .body(Body::from(text.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
