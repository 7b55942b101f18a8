//! Cross-origin policy
//!
//! [`AccessMode::Allowlist`] rejects requests whose `Origin` is not listed
//! (skipped in development) and echoes accepted origins back in the CORS
//! headers. [`AccessMode::Open`] hands everything to a permissive
//! `CorsLayer` instead.

use axum::{
  extract::{Request, State},
  http::{header, HeaderMap, HeaderValue, Method, StatusCode},
  middleware::Next,
  response::{IntoResponse, Response},
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{AccessMode, ServerConfig};
use crate::server::{error::ApiError, middleware::RequestContext, state::AppState};

/// Outcome of checking one request against the policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
  /// No check applies; leave the response untouched
  Bypass,
  /// Allowed; echo this origin in the CORS headers
  Allow(String),
  Reject,
}

pub fn check_origin(config: &ServerConfig, origin: Option<&str>) -> OriginDecision {
  if config.access_mode == AccessMode::Open || config.environment.is_development() {
    return OriginDecision::Bypass;
  }

  match origin {
    Some(origin) if config.is_allowed_origin(origin) => OriginDecision::Allow(origin.to_string()),
    _ => OriginDecision::Reject,
  }
}

/// Echo `origin` and limit cross-origin calls to JSON POSTs
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
  if let Ok(value) = HeaderValue::from_str(origin) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
  }
  headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST"));
  headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
  headers.insert(header::VARY, HeaderValue::from_static("Origin"));
}

/// CORS layer used in open mode
pub fn open_cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE])
    .max_age(Duration::from_secs(60 * 60))
}

/// Gate a request on the allowlist; runs before method routing
pub async fn enforce_access(State(state): State<AppState>, request: Request, next: Next) -> Response {
  let origin = request
    .headers()
    .get(header::ORIGIN)
    .and_then(|value| value.to_str().ok())
    .map(str::to_string);

  match check_origin(&state.config, origin.as_deref()) {
    OriginDecision::Bypass => next.run(request).await,
    OriginDecision::Reject => {
      let context = request.extensions().get::<RequestContext>().cloned();
      if let Some(context) = context {
        context
          .log_warn(&format!("Rejected origin: {}", origin.as_deref().unwrap_or("<none>")), "access")
          .await;
      }
      ApiError::Forbidden.into_response()
    }
    OriginDecision::Allow(origin) => {
      let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
      } else {
        next.run(request).await
      };
      apply_cors_headers(response.headers_mut(), &origin);
      response
    }
  }
}
