use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use smellcheck::cli::client::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use smellcheck::cli::commands;
use smellcheck::cli::page::ErrorDisplay;

#[derive(Parser)]
#[command(name = "smellcheck")]
#[command(about = "SmellCheck - what is that smell?\nLook up likely causes and fixes for a smell by location")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of SmellCheck"))]
struct Cli {
  #[command(flatten)]
  server: ServerArgs,

  #[command(subcommand)]
  command: Command,
}

/// Where and how to reach the server
#[derive(Args)]
struct ServerArgs {
  /// Base URL of the SmellCheck server
  #[arg(long = "server", global = true, env = "SMELLCHECK_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
  url: String,

  /// Request timeout in seconds
  #[arg(long, global = true, env = "SMELLCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  timeout: u64,

  /// Origin header to send (needed by production servers in allowlist mode)
  #[arg(long, global = true, env = "SMELLCHECK_ORIGIN")]
  origin: Option<String>,
}

impl From<ServerArgs> for ClientConfig {
  fn from(args: ServerArgs) -> Self {
    Self { base_url: args.url, timeout_secs: args.timeout, origin: args.origin }
  }
}

#[derive(Subcommand)]
enum Command {
  /// List locations with recorded smells
  Locations,
  /// List smells, optionally only those at one location
  Smells {
    /// Only show smells recorded at this location
    #[arg(short, long)]
    location: Option<String>,
  },
  /// Show possible causes and solutions for a smell at a location
  Lookup {
    /// Where the smell is
    location: String,
    /// Which smell it is
    smell: String,
    /// Log lookup failures instead of showing them
    #[arg(short, long)]
    silent: bool,
  },
  /// Choose a location and smell interactively
  Pick,
  /// Check that the server is up
  Status,
  /// Query server logs for debugging and monitoring
  Logs {
    /// Maximum number of log entries to return
    #[arg(short, long, default_value = "50")]
    limit: usize,
    /// Filter by log level (debug, info, success, warn, error, all)
    #[arg(long, default_value = "all")]
    level: String,
  },
}

async fn handle(command: Command, config: &ClientConfig) -> Result<()> {
  match command {
    Command::Locations => commands::locations(config).await,
    Command::Smells { location } => commands::smells(config, location.as_deref()).await,
    Command::Lookup { location, smell, silent } => {
      let display = if silent { ErrorDisplay::Silent } else { ErrorDisplay::Banner };
      commands::lookup(config, &location, &smell, display).await
    }
    Command::Pick => commands::pick(config).await,
    Command::Status => commands::status(config).await,
    Command::Logs { limit, level } => commands::logs(config, limit, &level).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = ClientConfig::from(cli.server);

  handle(cli.command, &config).await?;
  Ok(())
}
