//! Logs endpoint handler

use axum::{
  extract::{rejection::QueryRejection, Extension, Query},
  response::Json,
};
use bentley::request_log::LogLevel;

use crate::server::{
  error::ApiError,
  middleware::RequestContext,
  types::{LogsQuery, LogsResponse},
};

const DEFAULT_LIMIT: usize = 100;
const COMPONENT: &str = "logs-api";

/// GET /logs - Most recent request-log entries; `level=all` or no level returns every level
pub async fn get_logs(
  Extension(context): Extension<RequestContext>,
  query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
  let Query(query) = match query {
    Ok(query) => query,
    Err(rejection) => {
      context.log_warn(&format!("Rejected query: {rejection}"), COMPONENT).await;
      return Err(ApiError::InvalidQuery);
    }
  };

  let level = query
    .level
    .as_deref()
    .filter(|level| !level.eq_ignore_ascii_case("all"))
    .map(|level| level.parse::<LogLevel>())
    .transpose()
    .map_err(|_| ApiError::InvalidLogLevel)?;

  let logs = context.logger.entries(Some(query.limit.unwrap_or(DEFAULT_LIMIT)), level).await?;
  Ok(Json(LogsResponse { logs }))
}
