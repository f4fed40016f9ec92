//! Artifact serialization
//!
//! The pricebook is written as canonical pretty-printed JSON, once per
//! successful run. The write goes through a temporary sibling file and a
//! rename, so a failed run never leaves a truncated artifact behind.

use crate::error::PricebookResult;
use crate::types::Pricebook;
use std::fs;
use std::path::Path;
use tracing::info;

/// Serialize the pricebook and write it to `path`, creating parent
/// directories as needed.
pub fn write_pricebook(book: &Pricebook, path: &Path) -> PricebookResult<()> {
    let mut json = serde_json::to_string_pretty(book)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;

    info!(path = %path.display(), bytes = json.len(), "artifact written");
    Ok(())
}

/// Read a previously written artifact back into memory.
pub fn read_pricebook(path: &Path) -> PricebookResult<Pricebook> {
    let content = fs::read_to_string(path)?;
    let book = serde_json::from_str(&content)?;
    Ok(book)
}
