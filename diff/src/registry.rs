//! Registry comparison: flat property-set diffing and the per-command state
//! machine.
//!
//! Each command in either snapshot lands in one of four states: unchanged,
//! added, removed, or modified. A command present in both snapshots is
//! matched by id and plugin, since two plugins may register the same id, and
//! counts as modified when any of its three name families changed.

use command_snapshot_core::{ChangeEntry, CommandDescriptor, RegistrySnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Diff of one flat name family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDiff {
    /// Names only the current snapshot has.
    pub added: Vec<String>,
    /// Names only the previous snapshot has.
    pub removed: Vec<String>,
    /// Added and removed entries, tagged; unchanged names are omitted.
    pub changed: Vec<ChangeEntry>,
    /// Every current name in order, added ones tagged, followed by the
    /// synthesized removed entries. The full "current plus phantom removals"
    /// view used for rendering.
    pub combined: Vec<ChangeEntry>,
}

/// Diffs one name family between the previous and current snapshot.
///
/// # Examples
///
/// ```
/// use command_snapshot_diff::diff_property;
///
/// let previous = vec!["force".to_string(), "json".to_string()];
/// let current = vec!["json".to_string(), "verbose".to_string()];
/// let diff = diff_property(&previous, &current);
/// assert_eq!(diff.added, vec!["verbose"]);
/// assert_eq!(diff.removed, vec!["force"]);
/// assert_eq!(diff.changed.len(), 2);
/// ```
pub fn diff_property(previous: &[String], current: &[String]) -> PropertyDiff {
    let added: Vec<String> = current
        .iter()
        .filter(|name| !previous.contains(name))
        .cloned()
        .collect();
    let removed: Vec<String> = previous
        .iter()
        .filter(|name| !current.contains(name))
        .cloned()
        .collect();

    let mut changed = Vec::new();
    let mut combined = Vec::new();
    for name in current {
        if added.contains(name) {
            changed.push(ChangeEntry::added(name));
            combined.push(ChangeEntry::added(name));
        } else {
            combined.push(ChangeEntry::unchanged(name));
        }
    }
    for name in &removed {
        changed.push(ChangeEntry::removed(name));
        combined.push(ChangeEntry::removed(name));
    }

    PropertyDiff {
        added,
        removed,
        changed,
        combined,
    }
}

/// The change lists of one modified command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandChanges {
    /// Command id.
    pub name: String,
    /// Owning plugin.
    pub plugin: String,
    /// Changed flag long names.
    #[serde(default)]
    pub flags: Vec<ChangeEntry>,
    /// Changed short forms: flag characters and flag aliases.
    #[serde(default)]
    pub flag_chars: Vec<ChangeEntry>,
    /// Changed command aliases.
    #[serde(default)]
    pub aliases: Vec<ChangeEntry>,
}

impl CommandChanges {
    fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.flag_chars.is_empty() && self.aliases.is_empty()
    }

    /// Returns `true` when any entry in any family was removed.
    pub fn has_removals(&self) -> bool {
        self.flags
            .iter()
            .chain(&self.flag_chars)
            .chain(&self.aliases)
            .any(|entry| entry.removed)
    }
}

/// Full result of comparing two registry snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Ids only the current snapshot has, in current-snapshot order.
    #[serde(default)]
    pub added_commands: Vec<String>,
    /// Ids only the previous snapshot has, in previous-snapshot order.
    #[serde(default)]
    pub removed_commands: Vec<String>,
    /// Modified commands with their tagged change lists.
    #[serde(default)]
    pub diff_commands: Vec<CommandChanges>,
}

impl ComparisonReport {
    /// Returns `true` when any change was detected.
    pub fn has_changes(&self) -> bool {
        !self.added_commands.is_empty()
            || !self.removed_commands.is_empty()
            || !self.diff_commands.is_empty()
    }

    /// Returns `true` when a command or any tagged entry was removed.
    ///
    /// Removals are breaking changes and trigger the major-bump notice.
    pub fn has_removals(&self) -> bool {
        !self.removed_commands.is_empty()
            || self.diff_commands.iter().any(CommandChanges::has_removals)
    }
}

/// Compares two registry snapshots.
pub fn compare_registry(
    previous: &RegistrySnapshot,
    current: &RegistrySnapshot,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();

    for entry in &previous.entries {
        match current.find(&entry.id, &entry.plugin) {
            Some(latest) => {
                if let Some(changes) = diff_command(entry, latest) {
                    report.diff_commands.push(changes);
                }
            }
            None => report.removed_commands.push(entry.id.clone()),
        }
    }

    for entry in &current.entries {
        if previous.find(&entry.id, &entry.plugin).is_none() {
            report.added_commands.push(entry.id.clone());
        }
    }

    debug!(
        added = report.added_commands.len(),
        removed = report.removed_commands.len(),
        modified = report.diff_commands.len(),
        "registry comparison finished"
    );
    report
}

/// Diffs the three name families of one command present in both snapshots.
///
/// Returns `None` when nothing changed. Flag characters and flag aliases are
/// one merged short-form family: both break the same way when removed.
fn diff_command(previous: &CommandDescriptor, current: &CommandDescriptor) -> Option<CommandChanges> {
    let flags = diff_property(&previous.flags, &current.flags);

    let previous_short = concat(&previous.flag_chars, &previous.flag_aliases);
    let current_short = concat(&current.flag_chars, &current.flag_aliases);
    let short_forms = diff_property(&previous_short, &current_short);

    let aliases = diff_property(&previous.aliases, &current.aliases);

    let changes = CommandChanges {
        name: current.id.clone(),
        plugin: current.plugin.clone(),
        flags: flags.changed,
        flag_chars: short_forms.changed,
        aliases: aliases.changed,
    };
    if changes.is_empty() { None } else { Some(changes) }
}

fn concat(chars: &[String], aliases: &[String]) -> Vec<String> {
    chars.iter().chain(aliases).cloned().collect()
}
