//! Manifest files: the serialized output of the external collaborators.
//!
//! The registry manifest is what the "enumerate live commands" collaborator
//! writes: the full descriptor list plus the dev-plugin names and an
//! optional version used for `{version}` path templating. The schema
//! manifest is the schema generator's output, a whole
//! [`SchemaDocument`].

use std::io::BufReader;
use std::path::Path;

use command_snapshot_core::{CommandDescriptor, CommandSource, SchemaDocument};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// File-backed view of the live command registry.
///
/// # Examples
///
/// ```no_run
/// use command_snapshot_core::build_snapshot;
/// use command_snapshot_store::RegistryManifest;
///
/// let manifest = RegistryManifest::load("registry-manifest.json").unwrap();
/// let snapshot = build_snapshot(&manifest).unwrap();
/// println!("captured {} commands", snapshot.len());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryManifest {
    /// CLI version, substituted into `{version}` path placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Plugins excluded from snapshots.
    #[serde(default)]
    pub dev_plugins: Vec<String>,
    /// Every registered command.
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
}

impl RegistryManifest {
    /// Loads a registry manifest from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`](crate::StoreError::Io) if the file cannot
    /// be read, or [`StoreError::Json`](crate::StoreError::Json) if the
    /// content is not valid manifest JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let manifest: Self = serde_json::from_reader(reader)?;
        debug!(
            path = %path.as_ref().display(),
            commands = manifest.commands.len(),
            "loaded registry manifest"
        );
        Ok(manifest)
    }
}

impl CommandSource for RegistryManifest {
    fn commands(&self) -> Vec<CommandDescriptor> {
        self.commands.clone()
    }

    fn dev_plugins(&self) -> Vec<String> {
        self.dev_plugins.clone()
    }
}

/// Loads the schema generator's output from a JSON file.
///
/// # Errors
///
/// Returns [`StoreError::Io`](crate::StoreError::Io) if the file cannot be
/// read, or [`StoreError::Json`](crate::StoreError::Json) if the content is
/// not a valid schema document.
pub fn load_schema_manifest(path: impl AsRef<Path>) -> Result<SchemaDocument> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let document: SchemaDocument = serde_json::from_reader(reader)?;
    debug!(
        path = %path.as_ref().display(),
        commands = document.commands.len(),
        hooks = document.hooks.len(),
        "loaded schema manifest"
    );
    Ok(document)
}
