//! Homebrew formula lookup
//!
//! - `types`: the formula fields we rely on and how they map from the JSON API
//! - `client`: HTTP access to formula documents and bottle archives

pub mod client;
pub mod types;

pub use client::FormulaClient;
pub use types::FormulaMetadata;
