//! HTTP client for the smells API
//!
//! Thin wrapper over `reqwest` that speaks the `POST /api/smells` protocol
//! and turns `{ "error": ... }` bodies into [`ClientError::Http`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::cli::api::SmellsApi;
use crate::models::{SmellOption, SmellRecord};
use crate::server::types::{ErrorBody, LogEntry, LogsResponse, SmellsRequest, StatusResponse};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ClientError {
  #[error("{}", http_message(.status, .message))]
  Http { status: u16, message: Option<String> },

  #[error("Request timed out after {0}s")]
  Timeout(u64),

  #[error("Could not reach server: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("Invalid response format")]
  InvalidResponse(String),
}

fn http_message(status: &u16, message: &Option<String>) -> String {
  match message {
    Some(message) => message.clone(),
    None => format!("Server returned HTTP {status}"),
  }
}

impl ClientError {
  /// Message the server put in its error body, if any
  pub fn server_message(&self) -> Option<&str> {
    match self {
      ClientError::Http { message, .. } => message.as_deref(),
      _ => None,
    }
  }
}

/// Configuration for the smells HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the server (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
  /// `Origin` header to send; production servers in allowlist mode require one
  pub origin: Option<String>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS, origin: None }
  }
}

/// HTTP client for the smells API
pub struct SmellsClient {
  client: Client,
  config: ClientConfig,
}

impl SmellsClient {
  pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(ClientError::Transport)?;

    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }

  fn with_origin(&self, builder: RequestBuilder) -> RequestBuilder {
    match &self.config.origin {
      Some(origin) => builder.header(reqwest::header::ORIGIN, origin),
      None => builder,
    }
  }

  fn transport_error(&self, error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
      ClientError::Timeout(self.config.timeout_secs)
    } else {
      ClientError::Transport(error)
    }
  }

  async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| self.transport_error(e))?;

    if !status.is_success() {
      let message = serde_json::from_str::<ErrorBody>(&body).ok().map(|b| b.error);
      return Err(ClientError::Http { status: status.as_u16(), message });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
  }

  async fn post_smells<T: DeserializeOwned>(&self, request: &SmellsRequest) -> Result<T, ClientError> {
    let response = self
      .with_origin(self.client.post(self.url("/api/smells")).json(request))
      .send()
      .await
      .map_err(|e| self.transport_error(e))?;

    self.read_json(response).await
  }

  /// Check the server is reachable and report its mode
  pub async fn status(&self) -> Result<StatusResponse, ClientError> {
    let response = self
      .with_origin(self.client.get(self.url("/status")))
      .send()
      .await
      .map_err(|e| self.transport_error(e))?;

    self.read_json(response).await
  }

  /// Most recent server log entries
  pub async fn logs(&self, limit: usize, level: &str) -> Result<Vec<LogEntry>, ClientError> {
    let response = self
      .with_origin(self.client.get(self.url("/logs")))
      .query(&[("limit", limit.to_string()), ("level", level.to_string())])
      .send()
      .await
      .map_err(|e| self.transport_error(e))?;

    let logs: LogsResponse = self.read_json(response).await?;
    Ok(logs.logs)
  }
}

#[async_trait]
impl SmellsApi for SmellsClient {
  async fn locations(&self) -> Result<Vec<String>, ClientError> {
    self.post_smells(&SmellsRequest::locations()).await
  }

  async fn smells(&self) -> Result<Vec<SmellOption>, ClientError> {
    self.post_smells(&SmellsRequest::smells()).await
  }

  async fn results(&self, smell: &str, location: &str) -> Result<Vec<SmellRecord>, ClientError> {
    self.post_smells(&SmellsRequest::results(smell, location)).await
  }
}
