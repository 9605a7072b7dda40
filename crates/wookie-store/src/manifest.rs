//! Manifest file loading
//!
//! Widget manifests are read from `.json` or `.yaml`/`.yml` files and
//! validated before they reach registration.

use std::path::Path;

use crate::errors::{io_error, manifest_error, Result};
use wookie_core::manifest::WidgetManifest;

/// Read, parse and validate a manifest file
///
/// # Errors
///
/// * `Io` - the file cannot be read
/// * `InvalidManifest` - unknown extension, parse failure, or missing
///   identifier/name
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<WidgetManifest> {
    let path = path.as_ref();
    let shown = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| io_error("load_manifest", e))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let manifest: WidgetManifest = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| manifest_error(&shown, &e.to_string()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| manifest_error(&shown, &e.to_string()))?,
        _ => {
            return Err(manifest_error(
                &shown,
                "unsupported manifest format (expected .json, .yaml or .yml)",
            ))
        }
    };

    manifest.validate()?;
    tracing::debug!(path = shown.as_str(), guid = manifest.identifier.as_str(), "loaded manifest");
    Ok(manifest)
}
