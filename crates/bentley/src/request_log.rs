//! Persistent request logging for long-running services
//!
//! Entries are appended to a JSONL file so they survive restarts and can be
//! served back over HTTP. Writers share one file through an async mutex; every
//! entry is echoed to the console unless the log was created silent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;

// Types
// =====

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl LogLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Success => "success",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "debug" => Ok(LogLevel::Debug),
      "info" => Ok(LogLevel::Info),
      "success" => Ok(LogLevel::Success),
      "warn" | "warning" => Ok(LogLevel::Warn),
      "error" => Ok(LogLevel::Error),
      other => Err(format!("unknown log level '{other}'")),
    }
  }
}

/// HTTP request details attached to an entry
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct LogContext {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub origin: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,

  /// Request duration in milliseconds
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,
}

/// One line of the JSONL log
#[derive(Debug, Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: LogLevel,
  pub message: String,
  pub component: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<LogContext>,
}

struct RequestLogInner {
  path: PathBuf,
  silent: bool,
}

/// Shared handle to a JSONL request log; clones write to the same file
#[derive(Clone)]
pub struct RequestLog {
  inner: Arc<Mutex<RequestLogInner>>,
}

// File operations
// ===============

impl RequestLogInner {
  fn open(path: &Path, silent: bool) -> std::io::Result<Self> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    // Create without truncating an existing log
    OpenOptions::new().create(true).append(true).open(path)?;

    Ok(Self { path: path.to_path_buf(), silent })
  }

  fn append(&self, entry: &LogEntry) -> std::io::Result<()> {
    let line = serde_json::to_string(entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(file, "{line}")?;
    file.flush()
  }

  fn read(&self, limit: Option<usize>, level: Option<LogLevel>) -> std::io::Result<Vec<LogEntry>> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(&self.path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }

      // Malformed lines are skipped
      let Ok(entry) = serde_json::from_str::<LogEntry>(&line) else {
        continue;
      };

      if level.map_or(true, |wanted| entry.level == wanted) {
        entries.push(entry);
      }
    }

    // Keep the newest `limit` entries, oldest first
    if let Some(limit) = limit {
      let skip = entries.len().saturating_sub(limit);
      entries.drain(..skip);
    }

    Ok(entries)
  }
}

// Core API
// ========

impl RequestLog {
  /// Open (or create) the log at `path`, echoing entries to the console
  pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
    Self::with_silent(path, false)
  }

  /// Open (or create) the log at `path`; a silent log never prints
  pub fn with_silent<P: AsRef<Path>>(path: P, silent: bool) -> std::io::Result<Self> {
    let inner = RequestLogInner::open(path.as_ref(), silent)?;
    Ok(Self { inner: Arc::new(Mutex::new(inner)) })
  }

  /// Append an entry, reporting write failures
  pub async fn record(
    &self,
    level: LogLevel,
    message: &str,
    component: &str,
    context: Option<LogContext>,
  ) -> std::io::Result<()> {
    let entry = LogEntry {
      timestamp: Utc::now(),
      level,
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    let guard = self.inner.lock().await;
    if !guard.silent {
      echo(&entry);
    }
    guard.append(&entry)
  }

  /// Append an entry, ignoring write failures
  pub async fn log(&self, level: LogLevel, message: &str, component: &str) {
    let _ = self.record(level, message, component, None).await;
  }

  /// Append an entry with request context, ignoring write failures
  pub async fn log_with_context(
    &self,
    level: LogLevel,
    message: &str,
    component: &str,
    context: LogContext,
  ) {
    let _ = self.record(level, message, component, Some(context)).await;
  }

  /// Most recent entries (oldest first), optionally filtered by level
  pub async fn entries(
    &self,
    limit: Option<usize>,
    level: Option<LogLevel>,
  ) -> std::io::Result<Vec<LogEntry>> {
    let guard = self.inner.lock().await;
    guard.read(limit, level)
  }

  pub async fn path(&self) -> PathBuf {
    self.inner.lock().await.path.clone()
  }

  pub async fn info(&self, message: &str, component: &str) {
    self.log(LogLevel::Info, message, component).await;
  }

  pub async fn success(&self, message: &str, component: &str) {
    self.log(LogLevel::Success, message, component).await;
  }

  pub async fn warn(&self, message: &str, component: &str) {
    self.log(LogLevel::Warn, message, component).await;
  }

  pub async fn error(&self, message: &str, component: &str) {
    self.log(LogLevel::Error, message, component).await;
  }
}

fn echo(entry: &LogEntry) {
  let line = format!("{}: {}", entry.component, entry.message);
  match entry.level {
    LogLevel::Debug => crate::debug(&line),
    LogLevel::Info => crate::info(&line),
    LogLevel::Success => crate::success(&line),
    LogLevel::Warn => crate::warn(&line),
    LogLevel::Error => crate::error(&line),
  }
}
