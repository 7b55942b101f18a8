use bentley::request_log::RequestLog;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::SmellStore;

/// Shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn SmellStore>,
  pub config: Arc<ServerConfig>,
  pub logs: RequestLog,
}

impl AppState {
  pub fn new(store: Arc<dyn SmellStore>, config: ServerConfig, logs: RequestLog) -> Self {
    Self { store, config: Arc::new(config), logs }
  }
}
