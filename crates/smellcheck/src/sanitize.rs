//! Input scrubbing for table lookups

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s-]").expect("sanitize pattern is valid"));

/// Strip everything but ASCII letters, digits, whitespace and `-`, then trim
pub fn sanitize(input: &str) -> String {
  DISALLOWED.replace_all(input, "").trim().to_string()
}
