//! Two dependent choice lists: a location, then a smell seen there

use crate::cli::api::SmellsApi;
use crate::models::{dedup_preserving_order, SmellOption};

pub const LOCATION_PROMPT: &str = "Select location...";
pub const SMELL_PROMPT_DISABLED: &str = "Select location first";
pub const SMELL_PROMPT: &str = "Select smell...";

/// What the selector reports after every change
///
/// An empty field means nothing has been chosen for it yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  pub smell: String,
  pub location: String,
}

impl Selection {
  pub fn new(smell: impl Into<String>, location: impl Into<String>) -> Self {
    Self { smell: smell.into(), location: location.into() }
  }

  /// Both fields chosen; only then is a lookup worth sending
  pub fn is_complete(&self) -> bool {
    !self.smell.is_empty() && !self.location.is_empty()
  }
}

#[derive(Debug, Default)]
pub struct Selector {
  locations: Vec<String>,
  smells: Vec<SmellOption>,
  filtered: Vec<String>,
  selected_location: String,
  selected_smell: String,
}

impl Selector {
  pub fn new() -> Self {
    Self::default()
  }

  /// Selector over lists that were fetched elsewhere
  pub fn with_options(locations: Vec<String>, smells: Vec<SmellOption>) -> Self {
    Self { locations, smells, ..Self::default() }
  }

  /// Fetch both reference lists once
  ///
  /// Either fetch failing leaves both lists empty; the error is logged and
  /// not retried.
  pub async fn load(&mut self, api: &dyn SmellsApi) {
    let fetched = async {
      let smells = api.smells().await?;
      let locations = api.locations().await?;
      Ok::<_, crate::cli::ClientError>((locations, smells))
    }
    .await;

    match fetched {
      Ok((locations, smells)) => {
        self.locations = dedup_preserving_order(locations);
        self.smells = smells;
      }
      Err(e) => {
        bentley::error!("Error fetching data: {e}");
        self.locations.clear();
        self.smells.clear();
      }
    }

    self.refilter();
  }

  pub fn locations(&self) -> &[String] {
    &self.locations
  }

  /// Distinct smells at the selected location, in first-seen order
  pub fn smell_choices(&self) -> &[String] {
    &self.filtered
  }

  /// False until a location with at least one smell is selected
  pub fn smell_choices_enabled(&self) -> bool {
    !self.selected_location.is_empty() && !self.filtered.is_empty()
  }

  pub fn location_prompt(&self) -> &'static str {
    LOCATION_PROMPT
  }

  pub fn smell_prompt(&self) -> &'static str {
    if !self.selected_location.is_empty() {
      SMELL_PROMPT
    } else {
      SMELL_PROMPT_DISABLED
    }
  }

  pub fn selection(&self) -> Selection {
    Selection::new(self.selected_smell.clone(), self.selected_location.clone())
  }

  /// Choose a location; the smell choice resets
  pub fn select_location(&mut self, location: &str) -> Selection {
    self.selected_location = location.to_string();
    self.selected_smell.clear();
    self.refilter();
    self.selection()
  }

  pub fn select_smell(&mut self, smell: &str) -> Selection {
    self.selected_smell = smell.to_string();
    self.selection()
  }

  fn refilter(&mut self) {
    self.filtered = if self.selected_location.is_empty() {
      Vec::new()
    } else {
      dedup_preserving_order(
        self
          .smells
          .iter()
          .filter(|option| option.location == self.selected_location)
          .map(|option| option.name.clone()),
      )
    };
  }
}
