//! Console and request logging for the SmellCheck tools
//!
//! ## Features
//!
//! - Standard logging levels (info, warn, error, debug, success)
//! - Multi-line message support with consistent prefixes
//! - Banner framing for messages that must not be missed
//! - Persistent JSONL request logs behind the `request-log` feature
//!
//! ## Usage
//!
//! Level functions: `info()`, `warn()`, `error()`, `debug()`, `success()`
//!
//! The matching macros take `format!` arguments:
//!
//! ```
//! let location = "Basement";
//! bentley::info!("Loaded smells for {location}");
//! ```

use colored::*;

#[cfg(feature = "request-log")]
pub mod request_log;

/// Write every line of a message to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Bracketed level tag padded to a fixed column
pub fn format_prefix(color: Color, tag: &str) -> String {
  let pad = 7usize.saturating_sub(tag.len() + 2);
  format!("[{}]{:<pad$}", tag.color(color).bold(), "")
}

/// Prefix each line of `message` and send it to stderr
fn log_prefixed(color: Color, tag: &str, message: &str) {
  let prefix = format_prefix(color, tag);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Info level logging - general information
pub fn info(message: &str) {
  log_prefixed(Color::Blue, "info", message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  log_prefixed(Color::Yellow, "warn", message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  log_prefixed(Color::Red, "error", message);
}

/// Debug level logging - detailed diagnostic information
pub fn debug(message: &str) {
  log_prefixed(Color::Magenta, "debug", message);
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  log_prefixed(Color::Green, "sccs", message);
}

/// Border line of `width` repetitions of `border`
pub fn banner_line(width: usize, border: char) -> String {
  border.to_string().repeat(width)
}

/// Lines of a banner: border, message lines, border
pub fn banner_lines(message: &str, width: usize, border: char) -> Vec<String> {
  let edge = banner_line(width, border);
  let mut lines = vec![edge.clone()];
  lines.extend(message.lines().map(str::to_string));
  lines.push(edge);
  lines
}

/// Red banner for errors the user has to see
pub fn error_banner(message: &str) {
  for line in banner_lines(message, 50, '!') {
    log(&line.red().bold().to_string());
  }
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::warn(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::debug(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::success(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}
