//! Trait definitions for dependency injection

use crate::core::BrewResult;
use async_trait::async_trait;

/// Source of formula documents and bottle archives
///
/// Implementations map upstream statuses onto `BrewError::NotFound` /
/// `BrewError::Upstream` and network failures onto `BrewError::Transport`.
#[async_trait]
pub trait FormulaSource: Send + Sync {
    /// Fetch the raw JSON formula document for a package identifier
    async fn fetch_formula(&self, package_id: &str) -> BrewResult<String>;

    /// Download a bottle archive
    async fn fetch_bottle(&self, url: &str) -> BrewResult<Vec<u8>>;
}
