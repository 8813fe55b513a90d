//! Formula data model and its mapping from the Homebrew JSON API

use crate::core::{BrewError, BrewResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Formula metadata needed to locate and checksum a bottle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaMetadata {
    /// Formula name with any `@version` suffix removed
    pub name: String,
    pub description: String,
    /// Stable source archive URL
    pub source_url: String,
    /// Stable version
    pub current_version: String,
    /// Versions published as separate `name@version` formulae
    pub other_versions: Vec<String>,
    /// Bottle URL per configured platform tag; `None` when no bottle exists
    #[serde(rename = "pkg_url")]
    pub bottle_urls: BTreeMap<String, Option<String>>,
}

#[derive(Deserialize)]
struct RawFormula {
    name: String,
    #[serde(default)]
    desc: Option<String>,
    urls: RawUrls,
    versions: RawVersions,
    #[serde(default)]
    versioned_formulae: Vec<String>,
    #[serde(default)]
    bottle: Option<RawBottle>,
}

#[derive(Deserialize)]
struct RawUrls {
    stable: RawUrl,
}

#[derive(Deserialize)]
struct RawUrl {
    url: String,
}

#[derive(Deserialize)]
struct RawVersions {
    stable: String,
}

#[derive(Deserialize)]
struct RawBottle {
    #[serde(default)]
    stable: Option<RawBottleSpec>,
}

#[derive(Deserialize)]
struct RawBottleSpec {
    #[serde(default)]
    files: HashMap<String, RawBottleFile>,
}

#[derive(Deserialize)]
struct RawBottleFile {
    url: String,
}

impl FormulaMetadata {
    /// Parse a formula document, keeping bottle URLs for `platforms` only
    ///
    /// Malformed JSON is a `Json` error; well-formed JSON missing a required
    /// field (or carrying it with the wrong type) is a `Schema` error.
    pub fn from_json(body: &str, platforms: &[String]) -> BrewResult<Self> {
        let raw: RawFormula = serde_json::from_str(body).map_err(|e| {
            if e.is_data() {
                BrewError::Schema(e.to_string())
            } else {
                BrewError::Json(e)
            }
        })?;

        let files = raw
            .bottle
            .and_then(|b| b.stable)
            .map(|s| s.files)
            .unwrap_or_default();

        let bottle_urls = platforms
            .iter()
            .map(|platform| {
                let url = files.get(platform).map(|f| f.url.clone());
                (platform.clone(), url)
            })
            .collect();

        Ok(Self {
            name: strip_version_suffix(&raw.name).to_string(),
            description: raw.desc.unwrap_or_default(),
            source_url: raw.urls.stable.url,
            current_version: raw.versions.stable,
            other_versions: raw
                .versioned_formulae
                .iter()
                .filter_map(|f| versioned_suffix(f))
                .map(str::to_string)
                .collect(),
            bottle_urls,
        })
    }

    /// Platforms that have a bottle URL, in platform order
    pub fn bottles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bottle_urls
            .iter()
            .filter_map(|(platform, url)| url.as_deref().map(|u| (platform.as_str(), u)))
    }
}

/// `python@3.9` -> `python`
pub fn strip_version_suffix(name: &str) -> &str {
    name.split_once('@').map_or(name, |(base, _)| base)
}

/// `python@3.9` -> `Some("3.9")`; names without `@` have no version
fn versioned_suffix(formula: &str) -> Option<&str> {
    match formula.split_once('@') {
        Some((_, version)) if !version.is_empty() => Some(version),
        _ => {
            tracing::debug!(formula, "versioned formula without @version suffix");
            None
        }
    }
}
