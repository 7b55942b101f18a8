use assert_cmd::prelude::*;

use bentley::request_log::RequestLog;
use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::net::SocketAddr;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

use smellcheck::config::{Environment, ServerConfig};
use smellcheck::server::{create_router, AppState};
use smellcheck::store::MemoryStore;

/// Helper to create a Command for the `smellcheck` binary pointed at `server`
fn smellcheck_cmd(server: &str) -> Command {
  let mut cmd = Command::cargo_bin("smellcheck").expect("binary exists");
  cmd.env("SMELLCHECK_SERVER_URL", server).env("NO_COLOR", "1").env_remove("SMELLCHECK_ORIGIN");
  cmd
}

/// Serve the fixtures on an ephemeral port in development mode
async fn spawn_server(logs_dir: &TempDir) -> SocketAddr {
  let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/smells.json");
  let store = Arc::new(MemoryStore::from_json_file(path).unwrap());
  let logs = RequestLog::with_silent(logs_dir.path().join("server.logs.jsonl"), true).unwrap();
  let config = ServerConfig { environment: Environment::Development, ..Default::default() };
  let app = create_router(AppState::new(store, config, logs));

  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  addr
}

#[test]
fn test_help_lists_commands() {
  smellcheck_cmd("http://127.0.0.1:1")
    .arg("--help")
    .assert()
    .success()
    .stdout(contains("lookup").and(contains("locations")).and(contains("pick")));
}

#[test]
#[serial]
fn test_server_requires_supabase_without_fixtures() {
  let temp = TempDir::new().unwrap();

  Command::cargo_bin("smellcheck_server")
    .expect("binary exists")
    .env_remove("SUPABASE_URL")
    .env_remove("SUPABASE_ANON_KEY")
    .env_remove("SUPABASE_SERVICE_ROLE_KEY")
    .env_remove("SMELLCHECK_ENV")
    .env_remove("SMELLCHECK_ACCESS_MODE")
    .env_remove("SMELLCHECK_BIND")
    .arg("--logs-path")
    .arg(temp.path().join("server.logs.jsonl"))
    .assert()
    .failure()
    .stderr(contains("SUPABASE_URL"));
}

#[test]
#[serial]
fn test_unreachable_server_fails() {
  smellcheck_cmd("http://127.0.0.1:1")
    .args(["--timeout", "2", "status"])
    .assert()
    .failure()
    .stderr(contains("Could not reach server"));
}

#[tokio::test(flavor = "multi_thread")]
#[serial]
async fn test_commands_against_running_server() {
  let temp = TempDir::new().unwrap();
  let addr = spawn_server(&temp).await;
  let url = format!("http://{addr}");

  tokio::task::spawn_blocking(move || {
    smellcheck_cmd(&url)
      .arg("status")
      .assert()
      .success()
      .stdout(contains("healthy").and(contains("development")));

    smellcheck_cmd(&url)
      .arg("locations")
      .assert()
      .success()
      .stdout(contains("Basement").and(contains("Living Room")));

    smellcheck_cmd(&url)
      .args(["smells", "--location", "Kitchen"])
      .assert()
      .success()
      .stdout(contains("Rotten Egg").and(contains("Burning Plastic")).and(contains("Musty").not()));

    smellcheck_cmd(&url)
      .args(["lookup", "Basement", "Musty"])
      .assert()
      .success()
      .stdout(
        contains("Possible Cause 1: Mold or mildew")
          .and(contains("Solution 2: Seal foundation cracks"))
          .and(contains("Move storage into plastic bins")),
      );

    smellcheck_cmd(&url)
      .args(["lookup", "Attic", "Musty"])
      .assert()
      .success()
      .stdout(contains("No results found."));

    smellcheck_cmd(&url)
      .args(["logs", "--limit", "5"])
      .assert()
      .success()
      .stdout(contains("Request completed"));
  })
  .await
  .unwrap();
}
