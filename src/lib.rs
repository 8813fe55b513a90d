//! Brewhash: Homebrew formula lookup and bottle checksums
//!
//! Looks up a formula in the Homebrew JSON API, downloads its bottle for each
//! configured platform, and computes the SHA-256 of the formula's binary
//! inside each bottle.
//!
//! ```no_run
//! use brewhash::config::Config;
//! use brewhash::resolver::PackageResolver;
//!
//! # async fn example() -> brewhash::core::BrewResult<()> {
//! let config = Config::load()?;
//! let result = PackageResolver::new(&config)?.resolve("wget").await?;
//! println!("{}", brewhash::report::render_text(&result));
//! # Ok(())
//! # }
//! ```

pub use brewhash_core::{BrewError, BrewResult};

/// Core module re-exported from brewhash-core.
pub mod core {
    pub use brewhash_core::core::{error, path};
    pub use brewhash_core::{BrewError, BrewResult};
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Formula metadata and the Homebrew API client.
pub mod formula;

/// Bottle extraction and checksums.
pub mod bottle;

/// Package resolution.
pub mod resolver;

/// Result rendering.
pub mod report;
