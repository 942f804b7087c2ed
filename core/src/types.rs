//! Snapshot data model shared by the snapshot and schema pipelines.
//!
//! Everything here serializes to the camelCase JSON produced by the host
//! CLI's registry enumeration, so snapshot files written by earlier tool
//! versions deserialize unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default path of the registry snapshot file, relative to the repo root.
pub const DEFAULT_SNAPSHOT_FILE: &str = "./command-snapshot.json";

/// Default directory for generated JSON schema files.
pub const DEFAULT_SCHEMAS_DIR: &str = "./schemas";

/// One command's public surface as captured in a snapshot.
///
/// The four name lists cover everything a rename or removal can break for
/// downstream scripts: flag long names, per-flag short characters, per-flag
/// alternate names, and whole-command aliases.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::CommandDescriptor;
///
/// let descriptor = CommandDescriptor::new("snapshot:compare", "plugin-snapshot")
///     .with_flags(["filepath", "help"])
///     .with_flag_chars(["f", "h"]);
/// assert_eq!(descriptor.id, "snapshot:compare");
/// assert_eq!(descriptor.flags.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    /// Colon-delimited hierarchical command id, e.g. `snapshot:compare`.
    pub id: String,
    /// Plugin that contributed the command.
    #[serde(default)]
    pub plugin: String,
    /// Flag long names.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Single-character short forms declared by individual flags.
    #[serde(default)]
    pub flag_chars: Vec<String>,
    /// Alternate long names declared by individual flags.
    #[serde(default)]
    pub flag_aliases: Vec<String>,
    /// Aliases under which the whole command is also invocable.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CommandDescriptor {
    /// Creates a descriptor with the given id and owning plugin.
    pub fn new(id: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            plugin: plugin.into(),
            ..Self::default()
        }
    }

    /// Replaces the flag long names.
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the short-flag characters.
    pub fn with_flag_chars<I, S>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flag_chars = chars.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the flag aliases.
    pub fn with_flag_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flag_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the command aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered list of command descriptors persisted as the snapshot file.
///
/// Serializes as a bare JSON array. Entries are kept sorted by id so that
/// regenerating an unchanged registry produces a byte-identical file.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::{CommandDescriptor, RegistrySnapshot};
///
/// let snapshot = RegistrySnapshot::from_entries(vec![
///     CommandDescriptor::new("plugins:install", "plugin-plugins"),
///     CommandDescriptor::new("help", "plugin-help"),
/// ]);
/// assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["help", "plugins:install"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrySnapshot {
    /// Descriptors in id order.
    pub entries: Vec<CommandDescriptor>,
}

impl RegistrySnapshot {
    /// Builds a snapshot from descriptors, sorting them by id.
    pub fn from_entries(mut entries: Vec<CommandDescriptor>) -> Self {
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Self { entries }
    }

    /// Looks up a descriptor by id and owning plugin.
    pub fn find(&self, id: &str, plugin: &str) -> Option<&CommandDescriptor> {
        self.entries
            .iter()
            .find(|entry| entry.id == id && entry.plugin == plugin)
    }

    /// Iterates over command ids in snapshot order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Number of commands in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no commands.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generated JSON schemas for every command and hook, keyed by id.
///
/// Both maps are ordered, so iterating a document visits ids alphabetically
/// and generated files come out stable across runs.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::SchemaDocument;
/// use serde_json::json;
///
/// let mut document = SchemaDocument::default();
/// document
///     .commands
///     .insert("deploy".into(), json!({ "$ref": "#/definitions/Deploy" }));
/// assert!(!document.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// JSON schema per command id.
    #[serde(default)]
    pub commands: BTreeMap<String, Value>,
    /// JSON schema per hook id.
    #[serde(default)]
    pub hooks: BTreeMap<String, Value>,
}

impl SchemaDocument {
    /// Returns `true` when the document holds no command or hook schemas.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.hooks.is_empty()
    }

    /// Converts the document into a plain JSON value for tree comparison.
    pub fn to_value(&self) -> Value {
        let mut root = serde_json::Map::new();
        root.insert("commands".to_string(), map_value(&self.commands));
        root.insert("hooks".to_string(), map_value(&self.hooks));
        Value::Object(root)
    }
}

/// A named item (flag, alias, char, or command) tagged with its transition.
///
/// An entry with neither tag set means "unchanged"; unchanged entries are
/// filtered out before reporting.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::ChangeEntry;
///
/// let entry = ChangeEntry::added("json");
/// assert!(entry.added);
/// assert!(!entry.removed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Flag, alias, char, or command name.
    pub name: String,
    /// Present in current but not in the previous snapshot.
    #[serde(default, skip_serializing_if = "is_false")]
    pub added: bool,
    /// Present in the previous snapshot but not in current.
    #[serde(default, skip_serializing_if = "is_false")]
    pub removed: bool,
}

impl ChangeEntry {
    /// An entry present in both snapshots.
    pub fn unchanged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An entry that only the current snapshot has.
    pub fn added(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            added: true,
            ..Self::default()
        }
    }

    /// An entry that only the previous snapshot has.
    pub fn removed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            removed: true,
            ..Self::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn map_value(map: &BTreeMap<String, Value>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let descriptor = CommandDescriptor::new("deploy:functions", "plugin-deploy")
            .with_flags(["force"])
            .with_flag_chars(["f"])
            .with_flag_aliases(["force-deploy"])
            .with_aliases(["deploy:fn"]);
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["id"], "deploy:functions");
        assert_eq!(value["flagChars"][0], "f");
        assert_eq!(value["flagAliases"][0], "force-deploy");
        assert_eq!(value["aliases"][0], "deploy:fn");
    }

    #[test]
    fn test_descriptor_optional_families_default_empty() {
        let descriptor: CommandDescriptor = serde_json::from_value(json!({
            "id": "status",
            "plugin": "plugin-status",
            "flags": ["json"]
        }))
        .unwrap();
        assert!(descriptor.flag_chars.is_empty());
        assert!(descriptor.flag_aliases.is_empty());
        assert!(descriptor.aliases.is_empty());
    }

    #[test]
    fn test_snapshot_round_trips_as_bare_array() {
        let snapshot = RegistrySnapshot::from_entries(vec![CommandDescriptor::new(
            "status",
            "plugin-status",
        )]);
        let raw = serde_json::to_string(&snapshot).unwrap();
        assert!(raw.starts_with('['));
        let back: RegistrySnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_from_entries_sorts_by_id() {
        let snapshot = RegistrySnapshot::from_entries(vec![
            CommandDescriptor::new("b", "p"),
            CommandDescriptor::new("a", "p"),
        ]);
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_find_matches_id_and_plugin() {
        let snapshot = RegistrySnapshot::from_entries(vec![
            CommandDescriptor::new("status", "plugin-a"),
            CommandDescriptor::new("status", "plugin-b").with_flags(["json"]),
        ]);
        let found = snapshot.find("status", "plugin-b").unwrap();
        assert_eq!(found.flags, vec!["json"]);
        assert!(snapshot.find("status", "plugin-c").is_none());
    }

    #[test]
    fn test_change_entry_omits_false_tags() {
        let value = serde_json::to_value(ChangeEntry::added("json")).unwrap();
        assert_eq!(value, json!({ "name": "json", "added": true }));

        let value = serde_json::to_value(ChangeEntry::unchanged("json")).unwrap();
        assert_eq!(value, json!({ "name": "json" }));
    }

    #[test]
    fn test_schema_document_defaults_missing_hooks() {
        let document: SchemaDocument = serde_json::from_value(json!({
            "commands": { "status": {} }
        }))
        .unwrap();
        assert!(document.hooks.is_empty());
        assert_eq!(document.commands.len(), 1);
    }

    #[test]
    fn test_schema_document_to_value_keeps_both_sections() {
        let mut document = SchemaDocument::default();
        document
            .commands
            .insert("status".into(), json!({ "type": "object" }));
        let value = document.to_value();
        assert_eq!(value["commands"]["status"]["type"], "object");
        assert_eq!(value["hooks"], json!({}));
    }
}
