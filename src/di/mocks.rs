//! Mock implementations of service traits for testing

use super::traits::FormulaSource;
use crate::core::{BrewError, BrewResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned upstream answer
#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(Vec<u8>),
    NotFound,
    Status(u16),
    /// Stands in for a network failure; surfaces as `BrewError::Io`
    /// because `reqwest::Error` cannot be constructed outside reqwest
    Unreachable,
}

/// Mock formula source for testing
///
/// Formula documents are keyed by package id and bottles by URL. Anything
/// not primed answers 404. Every bottle URL requested is recorded.
///
/// # Example
///
/// ```
/// use brewhash::di::mocks::MockFormulaSource;
///
/// let source = MockFormulaSource::new()
///     .with_formula("wget", r#"{"name":"wget"}"#)
///     .with_bottle("https://x/catalina.tar.gz", vec![1, 2, 3]);
///
/// assert!(source.bottle_requests().is_empty());
/// ```
#[derive(Default)]
pub struct MockFormulaSource {
    formulae: HashMap<String, MockResponse>,
    bottles: HashMap<String, MockResponse>,
    bottle_requests: Mutex<Vec<String>>,
}

impl MockFormulaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formula(self, package_id: &str, body: &str) -> Self {
        self.with_formula_response(package_id, MockResponse::Body(body.as_bytes().to_vec()))
    }

    pub fn with_formula_response(mut self, package_id: &str, response: MockResponse) -> Self {
        self.formulae.insert(package_id.to_string(), response);
        self
    }

    pub fn with_bottle(self, url: &str, bytes: Vec<u8>) -> Self {
        self.with_bottle_response(url, MockResponse::Body(bytes))
    }

    pub fn with_bottle_response(mut self, url: &str, response: MockResponse) -> Self {
        self.bottles.insert(url.to_string(), response);
        self
    }

    /// Bottle URLs requested so far, in request order
    pub fn bottle_requests(&self) -> Vec<String> {
        self.bottle_requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn answer(response: Option<&MockResponse>, url: &str) -> BrewResult<Vec<u8>> {
        match response {
            Some(MockResponse::Body(bytes)) => Ok(bytes.clone()),
            Some(MockResponse::Status(status)) => Err(BrewError::Upstream {
                status: *status,
                url: url.to_string(),
            }),
            Some(MockResponse::Unreachable) => Err(BrewError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("connection refused: {}", url),
            ))),
            Some(MockResponse::NotFound) | None => Err(BrewError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl FormulaSource for MockFormulaSource {
    async fn fetch_formula(&self, package_id: &str) -> BrewResult<String> {
        let url = format!("mock://formula/{}.json", package_id);
        let bytes = Self::answer(self.formulae.get(package_id), &url)?;
        // Decode like `reqwest::Response::text`: invalid UTF-8 is replaced
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_bottle(&self, url: &str) -> BrewResult<Vec<u8>> {
        if let Ok(mut requests) = self.bottle_requests.lock() {
            requests.push(url.to_string());
        }
        Self::answer(self.bottles.get(url), url)
    }
}
