//! `POST /api/smells` - the lookup endpoint

use axum::{
  body::Bytes,
  extract::{Extension, State},
  response::{IntoResponse, Json, Response},
};

use crate::models::dedup_preserving_order;
use crate::sanitize::sanitize;
use crate::server::{
  error::ApiError, middleware::RequestContext, state::AppState, types::SmellQuery,
};

const COMPONENT: &str = "smells-api";

/// Dispatch on the body's `type` and run the matching table query
pub async fn smells(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Response, ApiError> {
  let query = match SmellQuery::from_body(&body) {
    Ok(query) => query,
    Err(e) => {
      context.log_warn(&format!("Rejected request: {e}"), COMPONENT).await;
      return Err(e);
    }
  };

  let request_type = query.request_type();
  match run_query(&state, query).await {
    Ok(response) => {
      context.log_success(&format!("{request_type} succeeded"), COMPONENT).await;
      Ok(response)
    }
    Err(e) => {
      let detail = e.detail().unwrap_or_else(|| e.to_string());
      context.log_error(&format!("{request_type} failed: {detail}"), COMPONENT).await;
      Err(e)
    }
  }
}

async fn run_query(state: &AppState, query: SmellQuery) -> Result<Response, ApiError> {
  match query {
    SmellQuery::Locations => {
      let locations = state.store.locations().await?;
      Ok(Json(dedup_preserving_order(locations)).into_response())
    }
    SmellQuery::Smells => {
      let smells = state.store.smells().await?;
      Ok(Json(smells).into_response())
    }
    SmellQuery::Results { smell, location } => {
      // Only the query sees sanitized values
      let results = state.store.results(&sanitize(&smell), &sanitize(&location)).await?;
      Ok(Json(results).into_response())
    }
  }
}

/// Anything but POST on the lookup route
pub async fn method_not_allowed() -> ApiError {
  ApiError::MethodNotAllowed
}
