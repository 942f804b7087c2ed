//! Registry snapshot files.
//!
//! The snapshot file is the bare JSON array of command descriptors,
//! pretty-printed with 4-space indentation so regenerated files diff cleanly
//! in version control against files written by earlier tool versions.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use command_snapshot_core::RegistrySnapshot;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Substitutes the `{version}` placeholder in a target path.
///
/// Only the first occurrence is replaced.
///
/// # Errors
///
/// Returns [`StoreError::InvalidInput`] when the path uses the placeholder
/// but no version is available to substitute.
pub fn resolve_version_path(path: &str, version: Option<&str>) -> Result<String> {
    if !path.contains("{version}") {
        return Ok(path.to_string());
    }
    match version {
        Some(version) => Ok(path.replacen("{version}", version, 1)),
        None => Err(StoreError::InvalidInput(format!(
            "path \"{path}\" uses {{version}} but no version is available"
        ))),
    }
}

/// Loads the previous snapshot from a JSON file.
///
/// A missing file is not an error: it means there is nothing to compare
/// against yet, so `Ok(None)` is returned and the caller reports "not
/// found".
///
/// # Errors
///
/// Returns [`StoreError::Io`] if an existing file cannot be read, or
/// [`StoreError::Json`] if its content is not a valid snapshot.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Option<RegistrySnapshot>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "snapshot file not found");
        return Ok(None);
    }
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: RegistrySnapshot = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), commands = snapshot.len(), "loaded snapshot");
    Ok(Some(snapshot))
}

/// Writes a snapshot as pretty-printed JSON with 4-space indentation.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written, or
/// [`StoreError::Json`] if serialization fails.
pub fn save_snapshot(snapshot: &RegistrySnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    snapshot.serialize(&mut serializer)?;
    info!(path = %path.display(), commands = snapshot.len(), "wrote snapshot file");
    Ok(())
}
