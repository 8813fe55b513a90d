//! Tests for the `brewhash` binary

use super::common::{brewhash_command, mount_wget, sha256_hex, wget_formula, WGET_BYTES};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `brewhash` command pointed at the mock server, with no user config
fn isolated(temp: &TempDir, server: &MockServer) -> Command {
    let mut command = brewhash_command();
    command
        .env("BREWHASH_CONFIG", temp.path().join("config.yaml"))
        .env("BREWHASH_API_URL", format!("{}/api", server.uri()))
        .env_remove("RUST_LOG");
    command
}

#[test]
fn test_no_arguments_prints_usage() {
    brewhash_command()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_too_many_arguments_prints_usage() {
    brewhash_command()
        .args(["wget", "curl"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_prints_info() {
    let server = MockServer::start().await;
    mount_wget(&server).await;
    let temp = TempDir::new().unwrap();

    isolated(&temp, &server)
        .arg("wget")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: wget"))
        .stdout(predicate::str::contains(
            "Description: Internet file retriever",
        ))
        .stdout(predicate::str::contains("Source: https://x/wget.tar.gz"))
        .stdout(predicate::str::contains("Version: 1.21"))
        .stdout(predicate::str::contains(format!(
            "SHA256 [catalina]: {}",
            sha256_hex(WGET_BYTES)
        )))
        .stdout(predicate::str::contains("[mojave]").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_json_output() {
    let server = MockServer::start().await;
    mount_wget(&server).await;
    let temp = TempDir::new().unwrap();

    let output = isolated(&temp, &server)
        .args(["wget", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["current_version"], "1.21");
    assert_eq!(value["hashes"]["catalina"], sha256_hex(WGET_BYTES));
    assert!(value["hashes"]["mojave"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_platform_flag_limits_bottles() {
    let server = MockServer::start().await;
    mount_wget(&server).await;
    let temp = TempDir::new().unwrap();

    let output = isolated(&temp, &server)
        .args(["wget", "--json", "--platform", "catalina"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let hashes = value["hashes"].as_object().unwrap();
    assert_eq!(hashes.len(), 1);
    assert!(hashes.contains_key("catalina"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_package_fails_quietly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/formula/nope.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    isolated(&temp, &server)
        .arg("nope")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error fetching package"))
        .stderr(predicate::str::contains("formula lookup failed").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_bottle_is_reported_on_stderr() {
    let server = MockServer::start().await;
    let catalina_url = format!("{}/bottles/wget-1.21.catalina.bottle.tar.gz", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/formula/wget.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wget_formula(&catalina_url)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bottles/wget-1.21.catalina.bottle.tar.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    isolated(&temp, &server)
        .arg("wget")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: wget"))
        .stdout(predicate::str::contains("SHA256").not())
        .stderr(predicate::str::contains("no hash for bottle"))
        .stderr(predicate::str::contains("catalina"));
}
