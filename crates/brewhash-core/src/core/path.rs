use crate::core::error::{BrewError, BrewResult};
use std::path::PathBuf;

/// Get the Brewhash home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\brewhash
/// - Linux: ~/.config/brewhash
/// - macOS: ~/Library/Application Support/brewhash
pub fn brewhash_home() -> BrewResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| BrewError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("brewhash"))
}

/// Get the config file path (`<brewhash home>/config.yaml`)
pub fn config_file() -> BrewResult<PathBuf> {
    Ok(brewhash_home()?.join("config.yaml"))
}
