//! Formula metadata + bottle checksum resolver

use crate::bottle::{member_path, sha256_hex, BottleArchive};
use crate::config::Config;
use crate::core::{BrewError, BrewResult};
use crate::di::traits::FormulaSource;
use crate::formula::{FormulaClient, FormulaMetadata};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of a lookup
///
/// Platforms whose bottle could not be fetched, opened or hashed keep a
/// `None` hash and get an entry in `bottle_errors`. Platforms without a
/// bottle URL have a `None` hash and no error.
#[derive(Debug, Clone, Serialize)]
pub struct PackageResult {
    /// Identifier the lookup was made with (may carry `@version`)
    pub package_id: String,
    #[serde(flatten)]
    pub metadata: FormulaMetadata,
    /// SHA-256 of the bottled binary per platform
    pub hashes: BTreeMap<String, Option<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub bottle_errors: BTreeMap<String, String>,
}

impl PackageResult {
    pub fn hash(&self, platform: &str) -> Option<&str> {
        self.hashes.get(platform).and_then(|h| h.as_deref())
    }

    /// True when every platform that has a bottle also has a hash
    pub fn is_complete(&self) -> bool {
        self.metadata
            .bottles()
            .all(|(platform, _)| self.hash(platform).is_some())
    }
}

/// Resolves a package identifier into a [`PackageResult`]
///
/// Holds no state between lookups; everything comes from the `Config` (or
/// source) it was built with.
pub struct PackageResolver {
    source: Arc<dyn FormulaSource>,
    platforms: Vec<String>,
}

impl PackageResolver {
    /// Create a resolver backed by the Homebrew HTTP API
    pub fn new(config: &Config) -> BrewResult<Self> {
        Ok(Self::with_source(
            Arc::new(FormulaClient::new(config)?),
            config.platforms.clone(),
        ))
    }

    /// Create a resolver over any formula source
    pub fn with_source(source: Arc<dyn FormulaSource>, platforms: Vec<String>) -> Self {
        Self { source, platforms }
    }

    /// Look up a formula and hash its bottled binary for each platform
    ///
    /// Fails only when the formula itself cannot be fetched or understood.
    /// Bottles are fetched one after another; a bottle failure only leaves
    /// that platform's hash absent.
    pub async fn resolve(&self, package_id: &str) -> BrewResult<PackageResult> {
        validate_package_id(package_id)?;

        let body = self.source.fetch_formula(package_id).await?;
        let metadata = FormulaMetadata::from_json(&body, &self.platforms)?;

        let member = member_path(package_id, &metadata.current_version, &metadata.name);
        let mut hashes: BTreeMap<String, Option<String>> = metadata
            .bottle_urls
            .keys()
            .map(|platform| (platform.clone(), None))
            .collect();
        let mut bottle_errors = BTreeMap::new();

        for (platform, url) in metadata.bottles() {
            match self.hash_bottle(url, &member).await {
                Ok(digest) => {
                    tracing::debug!(package = package_id, platform, %digest, "hashed bottle");
                    hashes.insert(platform.to_string(), Some(digest));
                }
                Err(e) => {
                    tracing::warn!(
                        package = package_id,
                        platform,
                        url,
                        error = %e,
                        "no hash for bottle"
                    );
                    bottle_errors.insert(platform.to_string(), e.to_string());
                }
            }
        }

        Ok(PackageResult {
            package_id: package_id.to_string(),
            metadata,
            hashes,
            bottle_errors,
        })
    }

    async fn hash_bottle(&self, url: &str, member: &str) -> BrewResult<String> {
        let bytes = self.source.fetch_bottle(url).await?;
        let archive = BottleArchive::open(&bytes)?;
        let data = archive.read_file(member)?;
        Ok(sha256_hex(&data))
    }
}

/// Check that `package_id` is usable as a single formula API path segment
pub fn validate_package_id(package_id: &str) -> BrewResult<()> {
    if package_id.is_empty() || package_id == "." || package_id == ".." {
        return Err(BrewError::InvalidPackage(format!("'{}'", package_id)));
    }

    if let Some(c) = package_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '+' | '-')))
    {
        return Err(BrewError::InvalidPackage(format!(
            "'{}' contains '{}'",
            package_id, c
        )));
    }

    Ok(())
}
