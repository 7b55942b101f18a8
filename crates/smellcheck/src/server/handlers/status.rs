//! Status and API information endpoints

use axum::{extract::State, response::Json};
use schemars::schema_for;

use crate::models::SmellRecord;
use crate::server::{
  state::AppState,
  types::{ApiInfoResponse, SmellsRequest, StatusResponse},
};

/// GET /status - Health check endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  Json(StatusResponse::healthy(state.config.environment, state.config.access_mode))
}

/// GET /api - Version, endpoints and JSON schemas of the lookup API
pub async fn api_info() -> Json<ApiInfoResponse> {
  Json(ApiInfoResponse {
    version: env!("CARGO_PKG_VERSION").to_string(),
    endpoints: vec![
      "POST /api/smells".to_string(),
      "GET /status".to_string(),
      "GET /api".to_string(),
      "GET /logs".to_string(),
    ],
    request_schema: serde_json::to_value(schema_for!(SmellsRequest)).unwrap_or_default(),
    record_schema: serde_json::to_value(schema_for!(SmellRecord)).unwrap_or_default(),
  })
}
