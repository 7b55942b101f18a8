use async_trait::async_trait;
use axum::{
  body::{to_bytes, Body},
  http::{header, Method, Request, StatusCode},
  Router,
};
use bentley::request_log::RequestLog;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use smellcheck::config::{AccessMode, Environment, ServerConfig};
use smellcheck::models::{SmellOption, SmellRecord};
use smellcheck::server::{create_router, AppState};
use smellcheck::store::{MemoryStore, SmellStore, StoreError};

const ALLOWED: &str = "https://smellcheck.vercel.app";
const FOREIGN: &str = "https://evil.example";

struct FailingStore;

#[async_trait]
impl SmellStore for FailingStore {
  async fn locations(&self) -> Result<Vec<String>, StoreError> {
    Err(StoreError::Status { status: 503, body: "upstream down".into() })
  }

  async fn smells(&self) -> Result<Vec<SmellOption>, StoreError> {
    Err(StoreError::Decode("bad rows".into()))
  }

  async fn results(&self, _name: &str, _location: &str) -> Result<Vec<SmellRecord>, StoreError> {
    Err(StoreError::Status { status: 401, body: "Invalid API key".into() })
  }
}

fn fixtures() -> Arc<dyn SmellStore> {
  let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/smells.json");
  Arc::new(MemoryStore::from_json_file(path).unwrap())
}

fn config(environment: Environment, access_mode: AccessMode) -> ServerConfig {
  ServerConfig { environment, access_mode, ..Default::default() }
}

fn app_with(config: ServerConfig, store: Arc<dyn SmellStore>) -> (TempDir, Router) {
  let dir = TempDir::new().unwrap();
  let logs = RequestLog::with_silent(dir.path().join("server.logs.jsonl"), true).unwrap();
  (dir, create_router(AppState::new(store, config, logs)))
}

fn dev_app() -> (TempDir, Router) {
  app_with(config(Environment::Development, AccessMode::Allowlist), fixtures())
}

fn post(body: Value, origin: Option<&str>) -> Request<Body> {
  let mut builder = Request::builder()
    .method(Method::POST)
    .uri("/api/smells")
    .header(header::CONTENT_TYPE, "application/json");
  if let Some(origin) = origin {
    builder = builder.header(header::ORIGIN, origin);
  }
  builder.body(Body::from(body.to_string())).unwrap()
}

fn request(method: Method, uri: &str, origin: Option<&str>) -> Request<Body> {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(origin) = origin {
    builder = builder.header(header::ORIGIN, origin);
  }
  builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_unknown_type_is_invalid_request() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(post(json!({"type": "bogus"}), None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(response).await, json!({"error": "Invalid request type"}));
}

#[tokio::test]
async fn test_non_object_body_is_invalid_request() {
  let (_dir, app) = dev_app();

  let response = app
    .oneshot(
      Request::builder()
        .method(Method::POST)
        .uri("/api/smells")
        .body(Body::from("not json"))
        .unwrap(),
    )
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(response).await, json!({"error": "Invalid request type"}));
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(request(Method::GET, "/api/smells", None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(json_body(response).await, json!({"error": "Method not allowed"}));
}

#[tokio::test]
async fn test_locations_have_no_duplicates() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(post(json!({"type": "getLocations"}), None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(json_body(response).await, json!(["Basement", "Bathroom", "Kitchen", "Living Room"]));
}

#[tokio::test]
async fn test_smells_are_ordered_by_name() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(post(json!({"type": "getSmells"}), None)).await.unwrap();
  let body = json_body(response).await;
  let names: Vec<&str> =
    body.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();

  assert_eq!(
    names,
    vec!["Burning Plastic", "Fishy", "Musty", "Musty", "Rotten Egg", "Sewage", "Sewage"]
  );
  assert_eq!(body[0], json!({"name": "Burning Plastic", "location": "Kitchen"}));
}

#[tokio::test]
async fn test_results_are_sanitized_and_return_every_match() {
  let (_dir, app) = dev_app();

  let response = app
    .oneshot(post(json!({"type": "getResults", "smell": "Musty!!", "location": " Basement;"}), None))
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let body = json_body(response).await;
  let ids: Vec<i64> = body.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
  assert_eq!(ids, vec![3, 6]);
}

#[tokio::test]
async fn test_results_require_both_fields() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(post(json!({"type": "getResults", "smell": "Musty"}), None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(response).await, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn test_results_sanitized_to_nothing_match_nothing() {
  let (_dir, app) = dev_app();

  let response = app
    .oneshot(post(json!({"type": "getResults", "smell": "!!!", "location": "Kitchen"}), None))
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
  let (_dir, app) = app_with(config(Environment::Development, AccessMode::Allowlist), Arc::new(FailingStore));

  let response = app
    .oneshot(post(json!({"type": "getResults", "smell": "Musty", "location": "Basement"}), None))
    .await
    .unwrap();

  assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json_body(response).await, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_production_rejects_foreign_origin() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(post(json!({"type": "getLocations"}), Some(FOREIGN))).await.unwrap();

  assert_eq!(response.status(), StatusCode::FORBIDDEN);
  assert_eq!(json_body(response).await, json!({"error": "Forbidden"}));
}

#[tokio::test]
async fn test_production_rejects_missing_origin() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(post(json!({"type": "getLocations"}), None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_origin_check_runs_before_method_check() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(request(Method::GET, "/api/smells", Some(FOREIGN))).await.unwrap();

  assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_allowed_origin_gets_cors_headers() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(post(json!({"type": "getLocations"}), Some(ALLOWED))).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let headers = response.headers();
  assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED);
  assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
  assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn test_allowed_preflight_is_answered() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(request(Method::OPTIONS, "/api/smells", Some(ALLOWED))).await.unwrap();

  assert_eq!(response.status(), StatusCode::NO_CONTENT);
  assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED);
}

#[tokio::test]
async fn test_development_skips_check_and_cors_headers() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(post(json!({"type": "getLocations"}), Some(FOREIGN))).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_open_mode_never_rejects() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Open), fixtures());

  let response = app.oneshot(post(json!({"type": "getLocations"}), Some(FOREIGN))).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_status_is_not_gated() {
  let (_dir, app) = app_with(config(Environment::Production, AccessMode::Allowlist), fixtures());

  let response = app.oneshot(request(Method::GET, "/status", None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let body = json_body(response).await;
  assert_eq!(body["status"], "healthy");
  assert_eq!(body["environment"], "production");
  assert_eq!(body["access_mode"], "allowlist");
}

#[tokio::test]
async fn test_api_info_lists_endpoints() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(request(Method::GET, "/api", None)).await.unwrap();
  let body = json_body(response).await;

  assert!(body["endpoints"].as_array().unwrap().contains(&json!("POST /api/smells")));
  assert!(body["request_schema"].is_object());
}

#[tokio::test]
async fn test_logs_record_handled_requests() {
  let (_dir, app) = dev_app();

  let response = app.clone().oneshot(post(json!({"type": "bogus"}), None)).await.unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  let response = app.oneshot(request(Method::GET, "/logs?level=warn", None)).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let body = json_body(response).await;
  let logs = body["logs"].as_array().unwrap();
  assert!(logs.iter().any(|entry| entry["message"]
    .as_str()
    .unwrap()
    .contains("Invalid request type")));
  assert!(logs.iter().all(|entry| entry["level"] == "warn"));
}

#[tokio::test]
async fn test_logs_reject_unknown_level() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(request(Method::GET, "/logs?level=loud", None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(response).await, json!({"error": "Invalid log level"}));
}

#[tokio::test]
async fn test_logs_reject_malformed_limit_with_json_error() {
  let (_dir, app) = dev_app();

  let response = app.oneshot(request(Method::GET, "/logs?limit=abc", None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(response).await, json!({"error": "Invalid query parameters"}));
}
