//! Library-level lookups

use super::common::{bottle, mount_wget, sha256_hex, WGET_BYTES};
use brewhash::config::Config;
use brewhash::core::BrewError;
use brewhash::di::mocks::MockFormulaSource;
use brewhash::resolver::PackageResolver;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WGET_FORMULA: &str = r#"{"name":"wget","desc":"Internet file retriever","urls":{"stable":{"url":"https://x/wget.tar.gz"}},"versions":{"stable":"1.21"},"versioned_formulae":[],"bottle":{"stable":{"files":{"catalina":{"url":"https://x/catalina.tar.gz"}}}}}"#;

fn config_for(server: &MockServer) -> Config {
    Config {
        api_url: format!("{}/api", server.uri()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_wget_scenario_with_mock_source() {
    let source = Arc::new(
        MockFormulaSource::new()
            .with_formula("wget", WGET_FORMULA)
            .with_bottle(
                "https://x/catalina.tar.gz",
                bottle("wget/1.21/bin/wget", WGET_BYTES),
            ),
    );
    let resolver = PackageResolver::with_source(
        source.clone(),
        vec!["catalina".to_string(), "mojave".to_string()],
    );

    let result = resolver.resolve("wget").await.unwrap();

    assert_eq!(result.metadata.name, "wget");
    assert_eq!(result.metadata.description, "Internet file retriever");
    assert_eq!(result.metadata.source_url, "https://x/wget.tar.gz");
    assert_eq!(result.metadata.current_version, "1.21");
    assert!(result.metadata.other_versions.is_empty());
    assert_eq!(result.hashes.len(), 2);
    assert_eq!(
        result.hashes.get("catalina"),
        Some(&Some(sha256_hex(WGET_BYTES)))
    );
    assert_eq!(result.hashes.get("mojave"), Some(&None));
    assert_eq!(result.metadata.bottle_urls.get("mojave"), Some(&None));
    assert_eq!(source.bottle_requests(), vec!["https://x/catalina.tar.gz"]);
}

#[tokio::test]
async fn test_wget_scenario_over_http() {
    let server = MockServer::start().await;
    mount_wget(&server).await;

    let resolver = PackageResolver::new(&config_for(&server)).unwrap();
    let result = resolver.resolve("wget").await.unwrap();

    assert_eq!(result.metadata.name, "wget");
    assert_eq!(result.hash("catalina"), Some(sha256_hex(WGET_BYTES).as_str()));
    assert_eq!(result.hash("mojave"), None);
    assert!(result.bottle_errors.is_empty());
}

#[tokio::test]
async fn test_unknown_formula_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/formula/not-a-formula.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolver = PackageResolver::new(&config_for(&server)).unwrap();
    let result = resolver.resolve("not-a-formula").await;

    assert!(matches!(result, Err(BrewError::NotFound { .. })));
}

#[tokio::test]
async fn test_bottle_404_keeps_metadata() {
    let server = MockServer::start().await;
    let catalina_url = format!("{}/bottles/gone.tar.gz", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/formula/wget.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(super::common::wget_formula(&catalina_url)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bottles/gone.tar.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolver = PackageResolver::new(&config_for(&server)).unwrap();
    let result = resolver.resolve("wget").await.unwrap();

    assert_eq!(result.metadata.current_version, "1.21");
    assert_eq!(result.hash("catalina"), None);
    assert!(result.bottle_errors["catalina"].contains("Not found"));
}

#[tokio::test]
async fn test_unreachable_bottle_host_keeps_metadata() {
    let server = MockServer::start().await;
    // Bind then drop a listener so the port is known to be closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let catalina_url = format!("http://127.0.0.1:{}/bottles/wget.tar.gz", port);
    Mock::given(method("GET"))
        .and(path("/api/formula/wget.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(super::common::wget_formula(&catalina_url)),
        )
        .mount(&server)
        .await;

    let resolver = PackageResolver::new(&config_for(&server)).unwrap();
    let result = resolver.resolve("wget").await.unwrap();

    assert_eq!(result.metadata.name, "wget");
    assert_eq!(result.metadata.current_version, "1.21");
    assert_eq!(result.hash("catalina"), None);
    assert!(result.bottle_errors["catalina"].starts_with("Transport error"));
}
