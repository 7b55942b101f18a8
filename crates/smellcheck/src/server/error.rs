use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::server::types::ErrorBody;
use crate::store::StoreError;

/// Every failure the API reports; the message is the response body
#[derive(Error, Debug)]
pub enum ApiError {
  #[error("Invalid request type")]
  InvalidRequestType,

  #[error("Missing required fields")]
  MissingFields,

  #[error("Invalid log level")]
  InvalidLogLevel,

  #[error("Invalid query parameters")]
  InvalidQuery,

  #[error("Forbidden")]
  Forbidden,

  #[error("Method not allowed")]
  MethodNotAllowed,

  #[error("Internal server error")]
  Store(#[from] StoreError),

  #[error("Internal server error")]
  Logs(#[from] std::io::Error),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidRequestType
      | ApiError::MissingFields
      | ApiError::InvalidLogLevel
      | ApiError::InvalidQuery => StatusCode::BAD_REQUEST,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Store(_) | ApiError::Logs(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Underlying cause for the server log; never sent to clients
  pub fn detail(&self) -> Option<String> {
    match self {
      ApiError::Store(e) => Some(e.to_string()),
      ApiError::Logs(e) => Some(e.to_string()),
      _ => None,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorBody { error: self.to_string() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert_eq!(ApiError::InvalidRequestType.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::InvalidQuery.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);

    let store = ApiError::from(StoreError::Decode("bad".into()));
    assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_internal_errors_hide_their_cause() {
    let err = ApiError::from(StoreError::Status { status: 401, body: "Invalid API key".into() });

    assert_eq!(err.to_string(), "Internal server error");
    assert!(err.detail().unwrap().contains("Invalid API key"));
  }
}
