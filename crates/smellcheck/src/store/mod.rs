//! Read-only access to the `smells` table

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{SmellOption, SmellRecord};

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Name of the hosted table
pub const SMELLS_TABLE: &str = "smells";

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Store request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Store returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Failed to decode store response: {0}")]
  Decode(String),

  #[error("Failed to load fixtures: {0}")]
  Fixtures(String),
}

/// The three fixed queries the API runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmellStore: Send + Sync {
  /// Location column of every row, ordered ascending; may repeat
  async fn locations(&self) -> Result<Vec<String>, StoreError>;

  /// `{name, location}` of every row, ordered by name
  async fn smells(&self) -> Result<Vec<SmellOption>, StoreError>;

  /// Every row whose name and location both match exactly
  async fn results(&self, name: &str, location: &str) -> Result<Vec<SmellRecord>, StoreError>;
}
