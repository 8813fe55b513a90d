//! HTTP client for the Homebrew formula API and bottle downloads

use crate::config::Config;
use crate::core::{BrewError, BrewResult};
use crate::di::traits::FormulaSource;
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode, Url};
use std::time::Duration;

/// Anonymous token ghcr.io accepts for public Homebrew bottle blobs
const GHCR_ANONYMOUS_TOKEN: &str = "Bearer QQ==";

const GHCR_HOST: &str = "ghcr.io";

/// Client for formula documents and bottle archives
pub struct FormulaClient {
    http_client: HttpClient,
    api_url: String,
    /// Host whose requests carry the anonymous bearer token
    ghcr_host: String,
}

impl FormulaClient {
    /// Create a new client from the lookup configuration
    pub fn new(config: &Config) -> BrewResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| BrewError::Config(format!("Invalid user agent: {}", e)))?,
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrewError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            ghcr_host: GHCR_HOST.to_string(),
        })
    }

    /// URL of the formula document for `package_id`
    pub fn formula_url(&self, package_id: &str) -> String {
        format!("{}/formula/{}.json", self.api_url, package_id)
    }

    /// Fetch the raw formula JSON for a package
    pub async fn fetch_formula(&self, package_id: &str) -> BrewResult<String> {
        let url = self.formula_url(package_id);
        let response = self.get(&url).await?;
        Ok(response.text().await?)
    }

    /// Download a bottle archive into memory
    pub async fn fetch_bottle(&self, url: &str) -> BrewResult<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn get(&self, url: &str) -> BrewResult<reqwest::Response> {
        tracing::debug!(url, "GET");

        let response = self.request_for(url).send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "request failed");
            BrewError::Transport(e)
        })?;

        check_status(response, url)
    }

    fn request_for(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http_client.get(url);
        if self.is_ghcr(url) {
            request.header(header::AUTHORIZATION, GHCR_ANONYMOUS_TOKEN)
        } else {
            request
        }
    }

    fn is_ghcr(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.eq_ignore_ascii_case(&self.ghcr_host)))
            .unwrap_or(false)
    }
}

/// Map anything but 200 to `NotFound` (404) or `Upstream`
fn check_status(response: reqwest::Response, url: &str) -> BrewResult<reqwest::Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err(BrewError::NotFound {
            url: url.to_string(),
        }),
        status => Err(BrewError::Upstream {
            status: status.as_u16(),
            url: url.to_string(),
        }),
    }
}

#[async_trait]
impl FormulaSource for FormulaClient {
    async fn fetch_formula(&self, package_id: &str) -> BrewResult<String> {
        Self::fetch_formula(self, package_id).await
    }

    async fn fetch_bottle(&self, url: &str) -> BrewResult<Vec<u8>> {
        Self::fetch_bottle(self, url).await
    }
}
