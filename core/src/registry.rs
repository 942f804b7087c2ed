//! Building a registry snapshot from a live command source.
//!
//! The host CLI's plugin registry is reached only through the
//! [`CommandSource`] trait, so the snapshot pipeline never touches global
//! state and tests can feed it canned descriptors.

use crate::{CommandDescriptor, RegistrySnapshot, ValidationError, validate_descriptor};

/// Supplies the live command registry and the dev-plugin list.
///
/// Implemented by whatever enumerates commands in the embedding application;
/// the shipped implementation reads a registry manifest file.
pub trait CommandSource {
    /// Every registered command, in any order.
    fn commands(&self) -> Vec<CommandDescriptor>;

    /// Names of plugins that exist only for development and are excluded
    /// from snapshots.
    fn dev_plugins(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Builds the current [`RegistrySnapshot`] from a command source.
///
/// Commands belonging to dev-only plugins are skipped, an alias equal to the
/// command's own id is discarded as noise, flag names are sorted, and the
/// resulting list is sorted by id. Every surviving descriptor is validated;
/// the first invariant breach aborts the build.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found on any descriptor.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::{CommandDescriptor, CommandSource, build_snapshot};
///
/// struct Fixed(Vec<CommandDescriptor>);
///
/// impl CommandSource for Fixed {
///     fn commands(&self) -> Vec<CommandDescriptor> {
///         self.0.clone()
///     }
/// }
///
/// let source = Fixed(vec![
///     CommandDescriptor::new("status", "plugin-status").with_aliases(["status", "st"]),
/// ]);
/// let snapshot = build_snapshot(&source).unwrap();
/// assert_eq!(snapshot.entries[0].aliases, vec!["st"]);
/// ```
pub fn build_snapshot(source: &dyn CommandSource) -> Result<RegistrySnapshot, ValidationError> {
    let dev_plugins = source.dev_plugins();

    let mut entries = Vec::new();
    for mut descriptor in source.commands() {
        if dev_plugins.contains(&descriptor.plugin) {
            continue;
        }
        descriptor.aliases.retain(|alias| *alias != descriptor.id);
        descriptor.flags.sort();

        if let Some(error) = validate_descriptor(&descriptor).into_iter().next() {
            return Err(error);
        }
        entries.push(descriptor);
    }

    Ok(RegistrySnapshot::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        commands: Vec<CommandDescriptor>,
        dev_plugins: Vec<String>,
    }

    impl CommandSource for FakeSource {
        fn commands(&self) -> Vec<CommandDescriptor> {
            self.commands.clone()
        }

        fn dev_plugins(&self) -> Vec<String> {
            self.dev_plugins.clone()
        }
    }

    #[test]
    fn test_build_filters_dev_plugins() {
        let source = FakeSource {
            commands: vec![
                CommandDescriptor::new("status", "plugin-status"),
                CommandDescriptor::new("dev:lint", "plugin-dev"),
            ],
            dev_plugins: vec!["plugin-dev".to_string()],
        };
        let snapshot = build_snapshot(&source).unwrap();
        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["status"]);
    }

    #[test]
    fn test_build_drops_self_referential_alias() {
        let source = FakeSource {
            commands: vec![
                CommandDescriptor::new("status", "plugin-status").with_aliases(["status", "st"]),
            ],
            dev_plugins: Vec::new(),
        };
        let snapshot = build_snapshot(&source).unwrap();
        assert_eq!(snapshot.entries[0].aliases, vec!["st"]);
    }

    #[test]
    fn test_build_sorts_flags_and_entries() {
        let source = FakeSource {
            commands: vec![
                CommandDescriptor::new("plugins:install", "plugin-plugins")
                    .with_flags(["json", "force"]),
                CommandDescriptor::new("help", "plugin-help"),
            ],
            dev_plugins: Vec::new(),
        };
        let snapshot = build_snapshot(&source).unwrap();
        assert_eq!(
            snapshot.ids().collect::<Vec<_>>(),
            vec!["help", "plugins:install"]
        );
        assert_eq!(snapshot.entries[1].flags, vec!["force", "json"]);
    }

    #[test]
    fn test_build_fails_on_invalid_descriptor() {
        let source = FakeSource {
            commands: vec![
                CommandDescriptor::new("deploy", "plugin-deploy")
                    .with_flags(["force", "fetch"])
                    .with_flag_chars(["f", "f"]),
            ],
            dev_plugins: Vec::new(),
        };
        let error = build_snapshot(&source).unwrap_err();
        assert!(matches!(error, ValidationError::DuplicateFlagChar { .. }));
    }
}
