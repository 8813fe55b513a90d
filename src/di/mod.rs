//! Dependency injection seam for upstream access
//!
//! `PackageResolver` talks to the network only through [`FormulaSource`], so
//! tests can swap the HTTP client for an in-memory source.
//!
//! # Example (Testing)
//! ```
//! use brewhash::di::mocks::MockFormulaSource;
//! use brewhash::resolver::PackageResolver;
//! use std::sync::Arc;
//!
//! let source = Arc::new(MockFormulaSource::new());
//! let resolver = PackageResolver::with_source(source, vec!["catalina".to_string()]);
//! # let _ = resolver;
//! ```

pub mod mocks;
pub mod traits;

pub use traits::FormulaSource;
