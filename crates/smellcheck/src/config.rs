//! Server configuration
//!
//! Everything is read from the environment. Loading goes through a lookup
//! function so tests can supply their own variables.

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const ENVIRONMENT: &str = "SMELLCHECK_ENV";
pub const ALLOWED_ORIGINS: &str = "SMELLCHECK_ALLOWED_ORIGINS";
pub const ACCESS_MODE: &str = "SMELLCHECK_ACCESS_MODE";
pub const BIND: &str = "SMELLCHECK_BIND";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Origins allowed when `SMELLCHECK_ALLOWED_ORIGINS` is unset
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
  "http://localhost:3000",
  "https://smellcheck.vercel.app",
  "https://smellcheck-16redflags.vercel.app",
  "https://smellcheck-git-main-16redflags.vercel.app",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Missing required config: {key}")]
  Missing { key: String },

  #[error("Invalid value '{value}' for {key}: {reason}")]
  Invalid { key: String, value: String, reason: String },
}

impl ConfigError {
  pub fn missing(key: impl Into<String>) -> Self {
    Self::Missing { key: key.into() }
  }

  pub fn invalid(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Invalid { key: key.into(), value: value.into(), reason: reason.into() }
  }
}

/// Deployment environment; development skips the origin check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  Development,
  #[default]
  Production,
}

impl Environment {
  pub fn is_development(&self) -> bool {
    matches!(self, Environment::Development)
  }
}

impl FromStr for Environment {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Environment::Development),
      "production" | "prod" => Ok(Environment::Production),
      other => Err(format!("expected 'development' or 'production', got '{other}'")),
    }
  }
}

impl fmt::Display for Environment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Environment::Development => f.write_str("development"),
      Environment::Production => f.write_str("production"),
    }
  }
}

/// Cross-origin policy of the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
  /// Only listed origins may call the API (bypassed in development)
  #[default]
  Allowlist,
  /// CORS open to every origin
  Open,
}

impl FromStr for AccessMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "allowlist" => Ok(AccessMode::Allowlist),
      "open" => Ok(AccessMode::Open),
      other => Err(format!("expected 'allowlist' or 'open', got '{other}'")),
    }
  }
}

impl fmt::Display for AccessMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AccessMode::Allowlist => f.write_str("allowlist"),
      AccessMode::Open => f.write_str("open"),
    }
  }
}

/// Hosted table credentials
#[derive(Clone)]
pub struct SupabaseConfig {
  pub url: Url,
  pub anon_key: String,
  pub service_role_key: String,
}

impl fmt::Debug for SupabaseConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SupabaseConfig")
      .field("url", &self.url.as_str())
      .field("anon_key", &"<redacted>")
      .field("service_role_key", &"<redacted>")
      .finish()
  }
}

impl SupabaseConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// All three keys are required; empty values count as missing
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let raw_url = required(&lookup, SUPABASE_URL)?;
    let url = Url::parse(&raw_url)
      .map_err(|e| ConfigError::invalid(SUPABASE_URL, &raw_url, e.to_string()))?;

    Ok(Self {
      url,
      anon_key: required(&lookup, SUPABASE_ANON_KEY)?,
      service_role_key: required(&lookup, SUPABASE_SERVICE_ROLE_KEY)?,
    })
  }
}

/// Settings of the HTTP service itself
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  pub environment: Environment,
  pub access_mode: AccessMode,
  pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
      environment: Environment::default(),
      access_mode: AccessMode::default(),
      allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
    }
  }
}

impl ServerConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(bind) = optional(&lookup, BIND) {
      config.bind = parse_value(BIND, &bind)?;
    }
    if let Some(environment) = optional(&lookup, ENVIRONMENT) {
      config.environment = parse_value(ENVIRONMENT, &environment)?;
    }
    if let Some(mode) = optional(&lookup, ACCESS_MODE) {
      config.access_mode = parse_value(ACCESS_MODE, &mode)?;
    }
    if let Some(origins) = optional(&lookup, ALLOWED_ORIGINS) {
      config.allowed_origins = parse_origins(&origins);
    }

    Ok(config)
  }

  /// Exact match against the allowlist; the development bypass lives in the access layer
  pub fn is_allowed_origin(&self, origin: &str) -> bool {
    self.allowed_origins.iter().any(|allowed| allowed == origin)
  }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes
pub fn parse_origins(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(|origin| origin.trim().trim_end_matches('/'))
    .filter(|origin| !origin.is_empty())
    .map(str::to_string)
    .collect()
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
  F: Fn(&str) -> Option<String>,
{
  lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  optional(lookup, key).ok_or_else(|| ConfigError::missing(key))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
  T: FromStr,
  T::Err: fmt::Display,
{
  value.parse().map_err(|e: T::Err| ConfigError::invalid(key, value, e.to_string()))
}
