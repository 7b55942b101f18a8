//! Rows of the `smells` table

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Stored `(smell, location) -> causes, solutions` entry
///
/// `(name, location)` is not unique in the table; lookups return every match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SmellRecord {
  pub id: i64,

  /// Smell label
  pub name: String,

  pub location: String,

  #[serde(default, deserialize_with = "null_as_empty")]
  #[schemars(with = "Option<Vec<String>>")]
  pub causes: Vec<String>,

  #[serde(default, deserialize_with = "null_as_empty")]
  #[schemars(with = "Option<Vec<String>>")]
  pub solutions: Vec<String>,
}

/// NULL array columns arrive as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `{name, location}` projection served by `getSmells`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SmellOption {
  pub name: String,
  pub location: String,
}

impl From<&SmellRecord> for SmellOption {
  fn from(record: &SmellRecord) -> Self {
    Self { name: record.name.clone(), location: record.location.clone() }
  }
}

/// Drop repeated values, keeping the first occurrence of each
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
  I: IntoIterator<Item = String>,
{
  let mut seen = std::collections::HashSet::new();
  values.into_iter().filter(|value| seen.insert(value.clone())).collect()
}
