//! In-process table used for local development and tests

use async_trait::async_trait;
use std::path::Path;

use super::{SmellStore, StoreError};
use crate::models::{SmellOption, SmellRecord};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  records: Vec<SmellRecord>,
}

impl MemoryStore {
  pub fn new(records: Vec<SmellRecord>) -> Self {
    Self { records }
  }

  /// Load records from a JSON array of rows
  pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|e| StoreError::Fixtures(format!("{}: {e}", path.display())))?;
    let records: Vec<SmellRecord> = serde_json::from_str(&content)
      .map_err(|e| StoreError::Fixtures(format!("{}: {e}", path.display())))?;
    Ok(Self::new(records))
  }

  pub fn records(&self) -> &[SmellRecord] {
    &self.records
  }
}

#[async_trait]
impl SmellStore for MemoryStore {
  async fn locations(&self) -> Result<Vec<String>, StoreError> {
    let mut locations: Vec<String> = self.records.iter().map(|r| r.location.clone()).collect();
    locations.sort();
    Ok(locations)
  }

  async fn smells(&self) -> Result<Vec<SmellOption>, StoreError> {
    let mut smells: Vec<SmellOption> = self.records.iter().map(SmellOption::from).collect();
    // Stable: rows sharing a name keep table order
    smells.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(smells)
  }

  async fn results(&self, name: &str, location: &str) -> Result<Vec<SmellRecord>, StoreError> {
    Ok(
      self
        .records
        .iter()
        .filter(|r| r.name == name && r.location == location)
        .cloned()
        .collect(),
    )
  }
}
