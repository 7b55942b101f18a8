//! Display formatting utilities for CLI output

use colored::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::SmellRecord;

/// Numbered cause and solution lines for one record, 1-based
pub fn result_lines(record: &SmellRecord) -> Vec<String> {
  let causes =
    record.causes.iter().enumerate().map(|(i, cause)| format!("Possible Cause {}: {cause}", i + 1));
  let solutions = record
    .solutions
    .iter()
    .enumerate()
    .map(|(i, solution)| format!("Solution {}: {solution}", i + 1));

  causes.chain(solutions).collect()
}

/// Print every record, one block each
pub fn display_results(records: &[SmellRecord]) {
  if records.is_empty() {
    println!("No results found.");
    return;
  }

  for record in records {
    println!("=== {} @ {} ===", record.name.yellow().bold(), record.location.blue().bold());
    for line in result_lines(record) {
      match line.split_once(": ") {
        Some((label, text)) if label.starts_with("Solution") => {
          println!("  {} {text}", format!("{label}:").green())
        }
        Some((label, text)) => println!("  {} {text}", format!("{label}:").cyan()),
        None => println!("  {line}"),
      }
    }
    println!();
  }
}

pub fn display_list(title: &str, items: &[String]) {
  if items.is_empty() {
    println!("No {title} found.");
    return;
  }

  println!("Available {title}:");
  for item in items {
    println!("  {}", item.blue());
  }
}

/// Frame a lookup failure so it is not missed
pub fn display_error(message: &str) {
  bentley::error_banner(message);
}

/// Spinner on stderr while a request is pending; inert when stderr is not a terminal
pub struct Spinner {
  bar: Option<ProgressBar>,
}

impl Spinner {
  #[must_use]
  pub fn start(message: &str) -> Self {
    if !Term::stderr().is_term() {
      return Self { bar: None };
    }

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_style(
      ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    Self { bar: Some(bar) }
  }

  pub fn stop(mut self) {
    if let Some(bar) = self.bar.take() {
      bar.finish_and_clear();
    }
  }
}

impl Drop for Spinner {
  fn drop(&mut self) {
    if let Some(bar) = self.bar.take() {
      bar.finish_and_clear();
    }
  }
}
