//! Supabase (PostgREST) backed table
//!
//! Queries go to `{SUPABASE_URL}/rest/v1/smells` authenticated with the
//! service-role key, so row-level security does not hide rows from the API.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{SmellStore, StoreError, SMELLS_TABLE};
use crate::config::SupabaseConfig;
use crate::models::{SmellOption, SmellRecord};

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize)]
struct LocationRow {
  location: String,
}

pub struct SupabaseStore {
  client: Client,
  table_url: Url,
  service_role_key: String,
}

impl SupabaseStore {
  pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
    let client = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;

    Ok(Self {
      client,
      table_url: table_url(&config.url, SMELLS_TABLE),
      service_role_key: config.service_role_key.clone(),
    })
  }

  async fn select<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<T, StoreError> {
    tracing::debug!(table = SMELLS_TABLE, ?query, "querying store");

    let response = self
      .client
      .get(self.table_url.clone())
      .header("apikey", &self.service_role_key)
      .bearer_auth(&self.service_role_key)
      .header(header::ACCEPT, "application/json")
      .query(query)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
      tracing::warn!(status = status.as_u16(), "store query rejected");
      return Err(StoreError::Status { status: status.as_u16(), body });
    }

    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
  }
}

/// `{base}/rest/v1/{table}`, keeping any path prefix on the base URL
fn table_url(base: &Url, table: &str) -> Url {
  let mut url = base.clone();
  let prefix = url.path().trim_end_matches('/').to_string();
  url.set_path(&format!("{prefix}/rest/v1/{table}"));
  url.set_query(None);
  url
}

#[async_trait]
impl SmellStore for SupabaseStore {
  async fn locations(&self) -> Result<Vec<String>, StoreError> {
    let rows: Vec<LocationRow> = self
      .select(&[("select", "location".to_string()), ("order", "location".to_string())])
      .await?;
    Ok(rows.into_iter().map(|row| row.location).collect())
  }

  async fn smells(&self) -> Result<Vec<SmellOption>, StoreError> {
    self.select(&[("select", "name,location".to_string()), ("order", "name".to_string())]).await
  }

  async fn results(&self, name: &str, location: &str) -> Result<Vec<SmellRecord>, StoreError> {
    self
      .select(&[
        ("select", "*".to_string()),
        ("name", format!("eq.{name}")),
        ("location", format!("eq.{location}")),
      ])
      .await
  }
}
