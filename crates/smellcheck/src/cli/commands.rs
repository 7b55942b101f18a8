use anyhow::{anyhow, Result};
use colored::*;
use dialoguer::{Confirm, Select};

use crate::cli::api::SmellsApi;
use crate::cli::client::{ClientConfig, SmellsClient};
use crate::cli::display::{display_error, display_list, display_results, Spinner};
use crate::cli::page::{ErrorDisplay, PageShell};
use crate::cli::selector::{Selection, Selector};
use crate::models::dedup_preserving_order;

fn client(config: &ClientConfig) -> Result<SmellsClient> {
  Ok(SmellsClient::with_config(config.clone())?)
}

/// List every location that has smells recorded
pub async fn locations(config: &ClientConfig) -> Result<()> {
  let client = client(config)?;
  let locations = client.locations().await?;

  display_list("locations", &locations);
  Ok(())
}

/// List smells, optionally only those seen at one location
pub async fn smells(config: &ClientConfig, location: Option<&str>) -> Result<()> {
  let client = client(config)?;

  match location {
    Some(location) => {
      let mut selector = Selector::with_options(Vec::new(), client.smells().await?);
      selector.select_location(location);
      display_list(&format!("smells at {location}"), selector.smell_choices());
    }
    None => {
      let names = dedup_preserving_order(client.smells().await?.into_iter().map(|s| s.name));
      display_list("smells", &names);
    }
  }

  Ok(())
}

/// Look up causes and solutions for one smell at one location
pub async fn lookup(
  config: &ClientConfig,
  location: &str,
  smell: &str,
  display: ErrorDisplay,
) -> Result<()> {
  let client = client(config)?;
  let mut page = PageShell::new(display);

  let spinner = Spinner::start(&format!("Looking up {smell} in {location}..."));
  page.handle_selection(&client, &Selection::new(smell, location)).await;
  spinner.stop();

  if let Some(message) = page.error() {
    display_error(message);
    return Err(anyhow!("{message}"));
  }

  display_results(page.results());
  Ok(())
}

/// Interactive lookup: pick a location, then a smell seen there
pub async fn pick(config: &ClientConfig) -> Result<()> {
  let client = client(config)?;
  let mut selector = Selector::new();
  let mut page = PageShell::new(ErrorDisplay::Banner);

  let spinner = Spinner::start("Loading smells...");
  selector.load(&client).await;
  spinner.stop();

  if selector.locations().is_empty() {
    return Err(anyhow!("No locations available"));
  }

  loop {
    let Some(index) = Select::new()
      .with_prompt(selector.location_prompt())
      .items(selector.locations())
      .default(0)
      .interact_opt()?
    else {
      return Ok(());
    };

    let location = selector.locations()[index].clone();
    let selection = selector.select_location(&location);
    page.handle_selection(&client, &selection).await;

    if selector.smell_choices().is_empty() {
      println!("No smells recorded for {}", location.yellow());
      continue;
    }

    let Some(index) = Select::new()
      .with_prompt(selector.smell_prompt())
      .items(selector.smell_choices())
      .default(0)
      .interact_opt()?
    else {
      continue;
    };

    let smell = selector.smell_choices()[index].clone();
    let selection = selector.select_smell(&smell);

    let spinner = Spinner::start("Fetching results...");
    page.handle_selection(&client, &selection).await;
    spinner.stop();

    match page.error() {
      Some(message) => display_error(message),
      None => display_results(page.results()),
    }

    if !Confirm::new().with_prompt("Look up another smell?").default(true).interact()? {
      return Ok(());
    }
  }
}

/// Show the server's health and mode
pub async fn status(config: &ClientConfig) -> Result<()> {
  let client = client(config)?;
  let status = client.status().await?;

  println!(
    "{} {} v{} ({}, access: {})",
    "✓".green(),
    status.status.green().bold(),
    status.version,
    status.environment.cyan(),
    status.access_mode.cyan()
  );
  Ok(())
}

/// Print recent server log entries
pub async fn logs(config: &ClientConfig, limit: usize, level: &str) -> Result<()> {
  let client = client(config)?;
  let logs = client.logs(limit, level).await?;

  if logs.is_empty() {
    println!("No logs found.");
    return Ok(());
  }

  for log in logs {
    let level = log.level.as_str();
    let level_colored = match level {
      "error" => level.red().bold(),
      "warn" => level.yellow().bold(),
      "info" => level.blue().bold(),
      "debug" => level.magenta(),
      "success" => level.bright_green().bold(),
      _ => level.normal(),
    };

    println!(
      "{} [{}] {} {}",
      log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().cyan(),
      level_colored,
      log.component.dimmed(),
      log.message
    );

    if let Some(context) = &log.context {
      let mut parts = Vec::new();
      if let Some(request_id) = &context.request_id {
        parts.push(format!("request_id: {}", request_id.bright_blue()));
      }
      if let Some(method) = &context.method {
        parts.push(format!("method: {}", method.magenta().bold()));
      }
      if let Some(path) = &context.path {
        parts.push(format!("path: {}", path.cyan()));
      }
      if let Some(origin) = &context.origin {
        parts.push(format!("origin: {origin}"));
      }
      if let Some(status) = context.status_code {
        parts.push(format!("status: {status}"));
      }
      if let Some(duration) = context.duration_ms {
        parts.push(format!("duration: {duration:.2}ms"));
      }

      if !parts.is_empty() {
        println!("    {}", parts.join(", ").dimmed());
      }
    }
  }

  Ok(())
}
