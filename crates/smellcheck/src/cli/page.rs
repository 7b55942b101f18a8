//! Lookup state behind a finished selection
//!
//! [`PageShell`] sends `getResults` for a complete [`Selection`] and keeps
//! the outcome: the records, whether a request is in flight, and the error
//! to show. Requests are numbered with [`Ticket`]s so a slow response can
//! never overwrite the answer to a newer selection.

use crate::cli::api::SmellsApi;
use crate::cli::client::ClientError;
use crate::cli::selector::Selection;
use crate::models::SmellRecord;

pub const FETCH_FAILED: &str = "Failed to fetch results";
pub const INVALID_RESPONSE: &str = "Invalid response format";

/// How lookup failures reach the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
  /// Keep the message for the caller to show
  #[default]
  Banner,
  /// Log the message and show nothing
  Silent,
}

/// Generation marker handed out by [`PageShell::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Message shown for a failed lookup
pub fn error_message(error: &ClientError) -> String {
  match error {
    ClientError::InvalidResponse(_) => INVALID_RESPONSE.to_string(),
    other => other.server_message().unwrap_or(FETCH_FAILED).to_string(),
  }
}

#[derive(Debug, Default)]
pub struct PageShell {
  display: ErrorDisplay,
  generation: u64,
  location: String,
  results: Vec<SmellRecord>,
  loading: bool,
  error: Option<String>,
}

impl PageShell {
  pub fn new(display: ErrorDisplay) -> Self {
    Self { display, ..Self::default() }
  }

  pub fn results(&self) -> &[SmellRecord] {
    &self.results
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Drop the current results and orphan any request in flight
  pub fn clear_results(&mut self) {
    self.generation += 1;
    self.results.clear();
    self.loading = false;
    self.error = None;
  }

  /// Start a request; any earlier ticket is now stale
  pub fn begin(&mut self) -> Ticket {
    self.generation += 1;
    self.loading = true;
    self.error = None;
    Ticket(self.generation)
  }

  /// Record the outcome for `ticket`
  ///
  /// Returns false, changing nothing, when a newer request has started
  /// since the ticket was issued.
  pub fn complete(
    &mut self,
    ticket: Ticket,
    outcome: Result<Vec<SmellRecord>, ClientError>,
  ) -> bool {
    if ticket.0 != self.generation {
      return false;
    }

    self.loading = false;
    match outcome {
      Ok(results) => self.results = results,
      Err(e) => {
        self.results.clear();
        let message = error_message(&e);
        match self.display {
          ErrorDisplay::Banner => self.error = Some(message),
          ErrorDisplay::Silent => bentley::error!("Error fetching results: {e}"),
        }
      }
    }
    true
  }

  /// React to a selector notification
  ///
  /// A new location clears whatever was shown; an incomplete selection
  /// sends nothing.
  pub async fn handle_selection(&mut self, api: &dyn SmellsApi, selection: &Selection) {
    if selection.location != self.location {
      self.location = selection.location.clone();
      self.clear_results();
    }

    if !selection.is_complete() {
      return;
    }

    let ticket = self.begin();
    let outcome = api.results(&selection.smell, &selection.location).await;
    self.complete(ticket, outcome);
  }
}
