//! Request context and logging middleware
//!
//! Every request gets a [`RequestContext`] carrying an ID, request metadata
//! and the shared request log. Handlers pull it from the request extensions.

use axum::{
  extract::{Request, State},
  http::{header, HeaderMap, Method, StatusCode, Uri},
  middleware::Next,
  response::Response,
};
use bentley::request_log::{LogContext, LogLevel, RequestLog};
use std::time::Instant;
use uuid::Uuid;

use crate::server::state::AppState;

/// Request metadata plus the shared request log
#[derive(Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub headers: HeaderMap,
  pub logger: RequestLog,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, headers: HeaderMap, logger: RequestLog) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, headers, logger }
  }

  pub fn origin(&self) -> Option<&str> {
    header_str(&self.headers, header::ORIGIN)
  }

  pub fn log_context(&self) -> LogContext {
    LogContext {
      request_id: Some(self.request_id.to_string()),
      method: Some(self.method.to_string()),
      path: Some(self.uri.path().to_string()),
      origin: self.origin().map(str::to_string),
      user_agent: header_str(&self.headers, header::USER_AGENT).map(str::to_string),
      ..Default::default()
    }
  }

  pub async fn log_success(&self, message: &str, component: &str) {
    self.logger.log_with_context(LogLevel::Success, message, component, self.log_context()).await;
  }

  pub async fn log_warn(&self, message: &str, component: &str) {
    self.logger.log_with_context(LogLevel::Warn, message, component, self.log_context()).await;
  }

  pub async fn log_error(&self, message: &str, component: &str) {
    self.logger.log_with_context(LogLevel::Error, message, component, self.log_context()).await;
  }

  /// Final line for a request: status, duration, and a level picked from the status
  pub async fn log_request_complete(&self, status: StatusCode, duration_ms: f64) {
    let level = if status.is_server_error() {
      LogLevel::Error
    } else if status.is_client_error() {
      LogLevel::Warn
    } else {
      LogLevel::Info
    };

    let context = LogContext {
      status_code: Some(status.as_u16()),
      duration_ms: Some(duration_ms),
      ..self.log_context()
    };

    self.logger.log_with_context(level, "Request completed", "http-request", context).await;
  }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
  headers.get(name).and_then(|value| value.to_str().ok())
}

/// Inject a [`RequestContext`] and log the outcome of every request
pub async fn request_context_middleware(
  State(state): State<AppState>,
  mut request: Request,
  next: Next,
) -> Response {
  let context = RequestContext::new(
    request.method().clone(),
    request.uri().clone(),
    request.headers().clone(),
    state.logs.clone(),
  );

  let started = Instant::now();
  request.extensions_mut().insert(context.clone());

  let response = next.run(request).await;

  let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status(), duration_ms).await;

  response
}
