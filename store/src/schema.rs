//! Schema document directories.
//!
//! Generated schemas are persisted either as one `schema.json` holding the
//! whole document, or as one file per command (plus a `hooks/` subdirectory
//! when hooks exist) with ids encoded into filesystem-safe names. A
//! directory whose entries are all semantic versions is a versioned tree;
//! the highest version is the one compared against.

use std::path::{Path, PathBuf};

use command_snapshot_core::{SchemaDocument, id_from_file_name, schema_file_name};
use semver::Version;
use tracing::{debug, info};

use crate::error::Result;

/// Loads the previous schema document from a directory.
///
/// Returns `Ok(None)` when the directory does not exist (nothing to compare
/// against yet). An empty directory loads as an empty document.
///
/// # Errors
///
/// Returns [`StoreError::Io`](crate::StoreError::Io) on any read failure and
/// [`StoreError::Json`](crate::StoreError::Json) on malformed schema files.
pub fn load_schema_document(path: impl AsRef<Path>) -> Result<Option<SchemaDocument>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "schema directory not found");
        return Ok(None);
    }

    let schemas_dir = select_version_dir(path)?;
    let files = json_files(&schemas_dir)?;

    if files.len() == 1
        && files[0]
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("schema.json"))
    {
        let raw = std::fs::read_to_string(&files[0])?;
        let document: SchemaDocument = serde_json::from_str(&raw)?;
        debug!(path = %files[0].display(), "loaded single-file schema document");
        return Ok(Some(document));
    }

    let mut document = SchemaDocument::default();
    for file in &files {
        let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let raw = std::fs::read_to_string(file)?;
        document
            .commands
            .insert(id_from_file_name(name), serde_json::from_str(&raw)?);
    }

    let hooks_dir = schemas_dir.join("hooks");
    if hooks_dir.is_dir() {
        for file in json_files(&hooks_dir)? {
            let Some(name) = file.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let raw = std::fs::read_to_string(&file)?;
            document
                .hooks
                .insert(id_from_file_name(name), serde_json::from_str(&raw)?);
        }
    }

    debug!(
        commands = document.commands.len(),
        hooks = document.hooks.len(),
        "loaded per-file schema document"
    );
    Ok(Some(document))
}

/// Writes a schema document under `dir`, created recursively.
///
/// With `single_file` the whole document lands in `<dir>/schema.json`;
/// otherwise one file per command is written at the top level and, when any
/// hooks exist, one file per hook under `<dir>/hooks/`. Every file is
/// pretty-printed JSON with 2-space indentation. Returns the written paths
/// in write order.
///
/// # Errors
///
/// Returns [`StoreError::Io`](crate::StoreError::Io) on any write failure
/// and [`StoreError::Json`](crate::StoreError::Json) if serialization fails.
pub fn save_schema_document(
    document: &SchemaDocument,
    dir: impl AsRef<Path>,
    single_file: bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut files = Vec::new();
    if single_file {
        let path = dir.join("schema.json");
        std::fs::write(&path, serde_json::to_string_pretty(document)?)?;
        info!(path = %path.display(), "wrote schema file");
        files.push(path);
        return Ok(files);
    }

    for (id, schema) in &document.commands {
        let path = dir.join(schema_file_name(id));
        std::fs::write(&path, serde_json::to_string_pretty(schema)?)?;
        info!(path = %path.display(), command = %id, "wrote schema file");
        files.push(path);
    }

    if !document.hooks.is_empty() {
        let hooks_dir = dir.join("hooks");
        std::fs::create_dir_all(&hooks_dir)?;
        for (id, schema) in &document.hooks {
            let path = hooks_dir.join(schema_file_name(id));
            std::fs::write(&path, serde_json::to_string_pretty(schema)?)?;
            info!(path = %path.display(), hook = %id, "wrote schema file");
            files.push(path);
        }
    }

    Ok(files)
}

/// Descends into the highest version subdirectory when every entry of `path`
/// parses as a semantic version.
fn select_version_dir(path: &Path) -> Result<PathBuf> {
    let mut versions = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        match entry.file_name().to_str().map(Version::parse) {
            Some(Ok(version)) => versions.push(version),
            _ => return Ok(path.to_path_buf()),
        }
    }

    match versions.iter().max() {
        Some(highest) => {
            debug!(version = %highest, "selected versioned schema directory");
            Ok(path.join(highest.to_string()))
        }
        None => Ok(path.to_path_buf()),
    }
}

/// Non-directory `*.json` entries of `dir`, sorted by name.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn document(commands: serde_json::Value, hooks: serde_json::Value) -> SchemaDocument {
        serde_json::from_value(json!({ "commands": commands, "hooks": hooks })).unwrap()
    }

    #[test]
    fn test_missing_directory_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = load_schema_document(dir.path().join("schemas")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_empty_directory_loads_as_empty_document() {
        let dir = TempDir::new().unwrap();
        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_single_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let doc = document(
            json!({ "deploy:functions": { "type": "object" } }),
            json!({ "init": { "type": "string" } }),
        );

        let files = save_schema_document(&doc, dir.path(), true).unwrap();
        assert_eq!(files, vec![dir.path().join("schema.json")]);

        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_per_file_round_trip_with_hooks() {
        let dir = TempDir::new().unwrap();
        let doc = document(
            json!({
                "deploy:functions": { "type": "object" },
                "status": { "type": "string" }
            }),
            json!({ "plugins:preinstall": { "type": "object" } }),
        );

        let files = save_schema_document(&doc, dir.path(), false).unwrap();
        assert_eq!(files.len(), 3);
        assert!(dir.path().join("deploy-functions.json").exists());
        assert!(dir.path().join("hooks/plugins-preinstall.json").exists());

        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_hyphenated_ids_survive_the_filename_codec() {
        let dir = TempDir::new().unwrap();
        let doc = document(json!({ "a:b:c-d": { "type": "object" } }), json!({}));

        save_schema_document(&doc, dir.path(), false).unwrap();
        assert!(dir.path().join("a-b-c__d.json").exists());

        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert!(loaded.commands.contains_key("a:b:c-d"));
    }

    #[test]
    fn test_versioned_tree_selects_highest_version() {
        let dir = TempDir::new().unwrap();
        for version in ["1.0.0", "1.10.0", "1.2.0"] {
            let doc = document(json!({ "status": { "version": version } }), json!({}));
            save_schema_document(&doc, dir.path().join(version), false).unwrap();
        }

        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.commands["status"]["version"], "1.10.0");
    }

    #[test]
    fn test_mixed_entries_disable_version_selection() {
        let dir = TempDir::new().unwrap();
        let doc = document(json!({ "status": { "type": "object" } }), json!({}));
        save_schema_document(&doc, dir.path(), false).unwrap();
        std::fs::create_dir(dir.path().join("1.0.0")).unwrap();

        // "status.json" is not a version, so the directory itself is read.
        let loaded = load_schema_document(dir.path()).unwrap().unwrap();
        assert!(loaded.commands.contains_key("status"));
    }

    #[test]
    fn test_hooks_absent_when_document_has_none() {
        let dir = TempDir::new().unwrap();
        let doc = document(json!({ "status": {} }), json!({}));
        save_schema_document(&doc, dir.path(), false).unwrap();
        assert!(!dir.path().join("hooks").exists());
    }
}
