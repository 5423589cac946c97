//! Test utilities for integration tests
use std::fs;
use std::sync::Arc;

use axum::{Router, body::Body};
use http::{Request, StatusCode};
use mockito::{Mock, ServerGuard};
use serde_json::Value;
use tower::util::ServiceExt;

use teams_scheduler::api::AppState;
use teams_scheduler::api::app;
use teams_scheduler::core::AppConfig;
use teams_scheduler::microsoft::ClientSecretCredential;

pub const MANAGER: &str = "manager@example.com";
pub const TOKEN_PATH: &str = "/test-tenant/oauth2/v2.0/token";
pub const EVENTS_PATH: &str = "/v1.0/users/manager%40example.com/events";
pub const SCHEDULE_PATH: &str = "/v1.0/users/manager%40example.com/calendar/getSchedule";
pub const FIND_TIMES_PATH: &str = "/v1.0/users/manager%40example.com/findMeetingTimes";
pub const SEND_MAIL_PATH: &str = "/v1.0/users/manager%40example.com/sendMail";

/// Configuration pointing both the token endpoint and Graph at a mock
/// server.
pub fn test_config(server_url: &str) -> AppConfig {
    AppConfig {
        tenant_id: String::from("test-tenant"),
        client_id: String::from("test-client-id"),
        client_secret: String::from("test-client-secret"),
        manager_email: String::from(MANAGER),
        time_zone: String::from("India Standard Time"),
        graph_api_url: format!("{}/v1.0", server_url),
        authority_url: server_url.to_string(),
    }
}

/// Creates the application router wired to the mock server
pub fn test_app(server_url: &str) -> Router {
    let http = reqwest::Client::new();
    let config = test_config(server_url);
    let credential = Arc::new(ClientSecretCredential::from_config(http.clone(), &config));
    app(Arc::new(AppState::new(config, credential, http)))
}

pub fn fixture(name: &str) -> String {
    fs::read_to_string(format!("./tests/data/{}", name)).expect("Missing fixture")
}

pub async fn mock_token(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token_type":"Bearer","expires_in":3599,"access_token":"test-token"}"#)
        .create_async()
        .await
}

pub async fn mock_token_failure(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", TOKEN_PATH)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_client","error_description":"Invalid client secret provided."}"#)
        .create_async()
        .await
}

/// POST a JSON body and return the status with the decoded response
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
