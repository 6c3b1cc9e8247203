//! End-to-end tests of the `elt` binary against mock exchange endpoints

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Helper function to create a test command isolated from the caller's environment
fn create_test_cmd(server: &MockServer, work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("elt").unwrap();
    cmd.current_dir(work_dir)
        .env("BINANCE_ENDPOINT", format!("{}/api/v3/time", server.uri()))
        .env("BYBIT_ENDPOINT", format!("{}/v5/market/time", server.uri()))
        .env("GATEIO_ENDPOINT", format!("{}/api/v4/spot/time", server.uri()))
        .env("PAUSE_MS", "0")
        .env("TIMEOUT_SECONDS", "1")
        .env_remove("EXCHANGES")
        .env_remove("OUTPUT_DIR")
        .env_remove("LOG_LEVEL")
        .env_remove("ENABLE_COLOR")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// binance answers, bybit is unavailable, gateio is slower than the timeout
async fn start_exchanges() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"serverTime":1700000000000}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v5/market/time"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/spot/time"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    server
}

async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_run_reports_and_saves() {
    let server = start_exchanges().await;
    let work_dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&server, work_dir.path());
    cmd.arg("--output").arg("run.json");
    let output = run(cmd).await;

    output
        .clone()
        .assert()
        .success()
        .stdout(predicate::str::contains("LATENCY TEST RESULTS SUMMARY"))
        .stdout(predicate::str::contains("  Status Code: 503"))
        .stdout(predicate::str::contains("  Status Code: N/A"))
        .stderr(predicate::str::contains("Results saved to"));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let positions: Vec<usize> = ["BINANCE Results:", "BYBIT Results:", "GATEIO Results:"]
        .iter()
        .map(|header| stdout.find(header).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(stdout.matches("  Request failed").count(), 2);

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(work_dir.path().join("run.json")).unwrap()).unwrap();
    let results = saved["results"].as_object().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results["binance"]["success"], json!(true));
    assert_eq!(results["binance"]["status_code"], json!(200));
    assert_eq!(results["bybit"]["latency"], json!("inf"));
    assert_eq!(results["bybit"]["status_code"], json!(503));
    assert_eq!(results["gateio"]["latency"], json!("inf"));
    assert_eq!(results["gateio"]["status_code"], Value::Null);
    assert!(results["gateio"]["error"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generated_filename_in_working_directory() {
    let server = start_exchanges().await;
    let work_dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&server, work_dir.path());
    cmd.arg("--exchange").arg("binance");
    run(cmd).await.assert().success();

    let names: Vec<String> = fs::read_dir(work_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("latency_test_results_"));
    assert!(names[0].ends_with(".json"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_save_writes_nothing() {
    let server = start_exchanges().await;
    let work_dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&server, work_dir.path());
    cmd.arg("--exchange").arg("binance").arg("--no-save");
    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("BINANCE Results:"))
        .stdout(predicate::str::contains("BYBIT Results:").not());

    assert_eq!(fs::read_dir(work_dir.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_exchange_is_rejected() {
    let server = start_exchanges().await;
    let work_dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&server, work_dir.path());
    cmd.arg("--exchange").arg("kraken");
    run(cmd)
        .await
        .assert()
        .code(2)
        .stderr(predicate::str::contains("kraken"));
}

#[test]
fn test_help_lists_flags() {
    Command::cargo_bin("elt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--exchange"))
        .stdout(predicate::str::contains("--no-save"))
        .stdout(predicate::str::contains("--pause-ms"));
}
