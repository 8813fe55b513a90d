//! Core utilities for Brewhash
//!
//! Holds the error type shared by every Brewhash crate and the helpers that
//! locate Brewhash's files on disk.

pub mod core;

pub use crate::core::error::{BrewError, BrewResult};
