//! Wire types shared by the server and the client

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::{AccessMode, Environment};
use crate::server::error::ApiError;

// Smells Endpoint
// ===============

/// Value of the `type` field of `POST /api/smells`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RequestType {
  GetLocations,
  GetSmells,
  GetResults,
}

impl RequestType {
  pub fn as_str(&self) -> &'static str {
    match self {
      RequestType::GetLocations => "getLocations",
      RequestType::GetSmells => "getSmells",
      RequestType::GetResults => "getResults",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "getLocations" => Some(RequestType::GetLocations),
      "getSmells" => Some(RequestType::GetSmells),
      "getResults" => Some(RequestType::GetResults),
      _ => None,
    }
  }
}

impl fmt::Display for RequestType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Body of `POST /api/smells` as the client sends it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SmellsRequest {
  #[serde(rename = "type")]
  pub kind: RequestType,

  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub smell: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub location: Option<String>,
}

impl SmellsRequest {
  pub fn locations() -> Self {
    Self { kind: RequestType::GetLocations, smell: None, location: None }
  }

  pub fn smells() -> Self {
    Self { kind: RequestType::GetSmells, smell: None, location: None }
  }

  pub fn results(smell: &str, location: &str) -> Self {
    Self {
      kind: RequestType::GetResults,
      smell: Some(smell.to_string()),
      location: Some(location.to_string()),
    }
  }
}

/// A validated query; built leniently from whatever body arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmellQuery {
  Locations,
  Smells,
  Results { smell: String, location: String },
}

impl SmellQuery {
  /// Anything that is not a JSON object counts as a body without `type`
  pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
    let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let kind = value
      .get("type")
      .and_then(Value::as_str)
      .filter(|kind| !kind.is_empty())
      .ok_or(ApiError::InvalidRequestType)?;

    match RequestType::parse(kind).ok_or(ApiError::InvalidRequestType)? {
      RequestType::GetLocations => Ok(SmellQuery::Locations),
      RequestType::GetSmells => Ok(SmellQuery::Smells),
      RequestType::GetResults => {
        let smell = non_empty_string(&value, "smell").ok_or(ApiError::MissingFields)?;
        let location = non_empty_string(&value, "location").ok_or(ApiError::MissingFields)?;
        Ok(SmellQuery::Results { smell, location })
      }
    }
  }

  pub fn request_type(&self) -> RequestType {
    match self {
      SmellQuery::Locations => RequestType::GetLocations,
      SmellQuery::Smells => RequestType::GetSmells,
      SmellQuery::Results { .. } => RequestType::GetResults,
    }
  }
}

fn non_empty_string(value: &Value, field: &str) -> Option<String> {
  value.get(field).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
  pub error: String,
}

// Status Endpoints
// ================

/// Response for /status
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  pub environment: String,
  pub access_mode: String,
}

impl StatusResponse {
  pub fn healthy(environment: Environment, access_mode: AccessMode) -> Self {
    Self {
      status: "healthy".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
      environment: environment.to_string(),
      access_mode: access_mode.to_string(),
    }
  }
}

/// Response for /api: version plus request and record schemas
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiInfoResponse {
  pub version: String,
  pub endpoints: Vec<String>,
  pub request_schema: Value,
  pub record_schema: Value,
}

// Logs Endpoint
// =============

/// Query string of /logs
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
  pub limit: Option<usize>,
  pub level: Option<String>,
}

/// Response for /logs
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogsResponse {
  pub logs: Vec<LogEntry>,
}

/// Individual log entry (re-exported from bentley)
pub type LogEntry = bentley::request_log::LogEntry;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_requests_serialize_with_type_field() {
    let json = serde_json::to_value(SmellsRequest::results("Musty", "Basement")).unwrap();
    assert_eq!(
      json,
      serde_json::json!({"type": "getResults", "smell": "Musty", "location": "Basement"})
    );

    let json = serde_json::to_value(SmellsRequest::locations()).unwrap();
    assert_eq!(json, serde_json::json!({"type": "getLocations"}));
  }

  #[test]
  fn test_query_dispatches_on_type() {
    assert_eq!(SmellQuery::from_body(br#"{"type": "getLocations"}"#).unwrap(), SmellQuery::Locations);
    assert_eq!(SmellQuery::from_body(br#"{"type": "getSmells"}"#).unwrap(), SmellQuery::Smells);
    assert_eq!(
      SmellQuery::from_body(br#"{"type": "getResults", "smell": "Gas", "location": "Garage"}"#)
        .unwrap(),
      SmellQuery::Results { smell: "Gas".into(), location: "Garage".into() }
    );
  }

  #[test]
  fn test_query_rejects_bad_type() {
    for body in [
      &br#"{"type": "bogus"}"#[..],
      br#"{"type": 42}"#,
      br#"{"type": ""}"#,
      br#"{"smell": "Gas"}"#,
      br#"["getLocations"]"#,
      b"not json",
      b"",
    ] {
      assert!(matches!(SmellQuery::from_body(body), Err(ApiError::InvalidRequestType)));
    }
  }

  #[test]
  fn test_results_query_requires_both_fields() {
    for body in [
      &br#"{"type": "getResults", "smell": "Gas"}"#[..],
      br#"{"type": "getResults", "location": "Garage"}"#,
      br#"{"type": "getResults", "smell": "", "location": "Garage"}"#,
      br#"{"type": "getResults", "smell": 3, "location": "Garage"}"#,
    ] {
      assert!(matches!(SmellQuery::from_body(body), Err(ApiError::MissingFields)));
    }
  }
}
