use async_trait::async_trait;

use crate::cli::client::ClientError;
use crate::models::{SmellOption, SmellRecord};

/// The lookup API as the selector and page shell see it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmellsApi: Send + Sync {
  /// Distinct locations
  async fn locations(&self) -> Result<Vec<String>, ClientError>;

  /// Every `{name, location}` pair
  async fn smells(&self) -> Result<Vec<SmellOption>, ClientError>;

  /// Records stored for one smell at one location
  async fn results(&self, smell: &str, location: &str) -> Result<Vec<SmellRecord>, ClientError>;
}
