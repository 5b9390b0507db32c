use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use keystone::router::init_router;
use keystone::state::AppState;
use keystone::modules::roles::repository::InMemoryRoleRepository;
use keystone_config::{CorsConfig, RoleFormConfig};
use keystone_core::permissions::console_catalog;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

pub fn setup_test_app() -> Router {
    setup_test_app_with(RoleFormConfig::default())
}

pub fn setup_test_app_with(role_form_config: RoleFormConfig) -> Router {
    let state = AppState::new(
        console_catalog(),
        Arc::new(InMemoryRoleRepository::new()),
        CorsConfig::default(),
        role_form_config,
    );
    init_router(state)
}

/// App whose role forms expire after `ttl` of inactivity.
#[allow(dead_code)]
pub fn setup_test_app_with_ttl(ttl: Duration) -> Router {
    setup_test_app_with(RoleFormConfig::with_session_ttl(ttl))
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Leaf ids of a JSON string array, in order.
#[allow(dead_code)]
pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap_or_else(|| panic!("expected array, got {value}"))
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
