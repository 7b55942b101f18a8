//! Axum router configuration for all endpoints

use axum::{
  middleware::from_fn_with_state,
  routing::{get, post},
  Router,
};
use tower_http::trace::TraceLayer;

use crate::config::AccessMode;
use crate::server::{
  access,
  handlers::{logs, smells, status},
  middleware::request_context_middleware,
  state::AppState,
};

/// Create the application router
///
/// The lookup and logs routes sit behind the access layer; `/status` and
/// `/api` stay reachable for health checks.
pub fn create_router(state: AppState) -> Router {
  let gated = Router::new()
    .route("/api/smells", post(smells::smells).fallback(smells::method_not_allowed))
    .route("/logs", get(logs::get_logs))
    .route_layer(from_fn_with_state(state.clone(), access::enforce_access));

  let router = Router::new()
    .route("/status", get(status::status))
    .route("/api", get(status::api_info))
    .merge(gated)
    .layer(from_fn_with_state(state.clone(), request_context_middleware))
    .layer(TraceLayer::new_for_http());

  let router = match state.config.access_mode {
    AccessMode::Open => router.layer(access::open_cors_layer()),
    AccessMode::Allowlist => router,
  };

  router.with_state(state)
}
