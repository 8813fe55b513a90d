//! Rendering of lookup results for the terminal

use crate::core::BrewResult;
use crate::resolver::PackageResult;

/// Human-readable summary, one field per line
///
/// Only platforms that have a hash get a `SHA256` line.
pub fn render_text(result: &PackageResult) -> String {
    let meta = &result.metadata;
    let mut lines = vec![
        format!("Name: {}", meta.name),
        format!("Description: {}", meta.description),
        format!("Source: {}", meta.source_url),
        format!("Version: {}", meta.current_version),
        format!("Other versions: {}", meta.other_versions.join(", ")),
    ];

    for (platform, hash) in &result.hashes {
        if let Some(hash) = hash {
            lines.push(format!("SHA256 [{}]: {}", platform, hash));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Pretty-printed JSON of the whole result
pub fn render_json(result: &PackageResult) -> BrewResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
