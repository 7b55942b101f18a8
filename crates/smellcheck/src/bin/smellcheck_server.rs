//! SmellCheck REST Server
//!
//! Serves `POST /api/smells` over the hosted `smells` table, or over a local
//! fixtures file when `--fixtures` is given.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use smellcheck::config::{AccessMode, Environment, ServerConfig, SupabaseConfig};
use smellcheck::server::startup::{default_logs_path, start_server};
use smellcheck::store::{MemoryStore, SmellStore, SupabaseStore};

#[derive(Parser)]
#[command(name = "smellcheck_server")]
#[command(about = "SmellCheck REST API Server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of SmellCheck"))]
struct Args {
  /// Server bind address (overrides SMELLCHECK_BIND)
  #[arg(long)]
  bind: Option<SocketAddr>,

  /// Serve records from a JSON file instead of Supabase
  #[arg(long)]
  fixtures: Option<PathBuf>,

  /// Where to write the request log
  #[arg(long)]
  logs_path: Option<PathBuf>,

  /// Cross-origin policy (overrides SMELLCHECK_ACCESS_MODE)
  #[arg(long, value_enum)]
  access_mode: Option<AccessMode>,

  /// Skip the origin allowlist (same as SMELLCHECK_ENV=development)
  #[arg(long)]
  development: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("smellcheck=debug,tower_http=debug,info")
  } else {
    EnvFilter::new("smellcheck=info,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let mut config = ServerConfig::from_env()?;
  if let Some(bind) = args.bind {
    config.bind = bind;
  }
  if let Some(access_mode) = args.access_mode {
    config.access_mode = access_mode;
  }
  if args.development {
    config.environment = Environment::Development;
  }

  let store: Arc<dyn SmellStore> = match &args.fixtures {
    Some(path) => {
      let store = MemoryStore::from_json_file(path)?;
      bentley::info!("Serving {} records from {}", store.records().len(), path.display());
      Arc::new(store)
    }
    None => {
      let supabase = SupabaseConfig::from_env()?;
      bentley::info!("Serving records from {}", supabase.url);
      Arc::new(SupabaseStore::new(&supabase).context("Failed to create Supabase client")?)
    }
  };

  let logs_path = args.logs_path.unwrap_or_else(default_logs_path);

  bentley::info!("Starting SmellCheck REST Server v{}", env!("CARGO_PKG_VERSION"));
  bentley::info!("Binding to address: {}", config.bind);

  start_server(config, store, &logs_path).await?;

  Ok(())
}
