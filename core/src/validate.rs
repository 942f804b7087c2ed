//! Descriptor validation.
//!
//! Within one command, the flag long names, short-flag characters, and flag
//! aliases must be pairwise disjoint: no two flags may claim the same short
//! character, and no short character or alias may shadow another flag's long
//! name. Violations are fatal at snapshot generation time, before anything is
//! written to disk.
//!
//! # Examples
//!
//! ```
//! use command_snapshot_core::{CommandDescriptor, validate_descriptor};
//!
//! let descriptor = CommandDescriptor::new("deploy", "plugin-deploy")
//!     .with_flags(["force", "json"])
//!     .with_flag_chars(["f", "j"]);
//! assert!(validate_descriptor(&descriptor).is_empty());
//!
//! // Invalid: two flags claim the short character "f"
//! let bad = CommandDescriptor::new("deploy", "plugin-deploy")
//!     .with_flags(["force", "fetch"])
//!     .with_flag_chars(["f", "f"]);
//! assert!(!validate_descriptor(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::CommandDescriptor;

/// Descriptor validation errors.
///
/// Each variant names the offending command and the colliding name. The
/// `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command id is empty or whitespace-only.
    #[error("command id cannot be empty")]
    EmptyCommandId,
    /// Two flags on the same command declare the same short character.
    #[error("duplicate short-flag character \"{name}\" on command {command}")]
    DuplicateFlagChar {
        /// Offending command id.
        command: String,
        /// Short character claimed twice.
        name: String,
    },
    /// Two flags on the same command declare the same alias.
    #[error("duplicate flag alias \"{name}\" on command {command}")]
    DuplicateFlagAlias {
        /// Offending command id.
        command: String,
        /// Alias claimed twice.
        name: String,
    },
    /// A short character or alias shadows another flag's long name.
    #[error("\"{name}\" on command {command} collides with a flag long name")]
    FlagNameCollision {
        /// Offending command id.
        command: String,
        /// Short character or alias equal to an existing long name.
        name: String,
    },
}

/// Validates one command descriptor.
///
/// Returns all invariant breaches found; an empty vector means the descriptor
/// is safe to persist. Callers generating a snapshot treat any returned error
/// as fatal.
pub fn validate_descriptor(descriptor: &CommandDescriptor) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if descriptor.id.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandId);
        return errors;
    }

    let long_names: HashSet<&str> = descriptor.flags.iter().map(String::as_str).collect();

    let mut seen_chars: HashSet<&str> = HashSet::new();
    for ch in &descriptor.flag_chars {
        if !seen_chars.insert(ch) {
            errors.push(ValidationError::DuplicateFlagChar {
                command: descriptor.id.clone(),
                name: ch.clone(),
            });
        }
        if long_names.contains(ch.as_str()) {
            errors.push(ValidationError::FlagNameCollision {
                command: descriptor.id.clone(),
                name: ch.clone(),
            });
        }
    }

    let mut seen_aliases: HashSet<&str> = HashSet::new();
    for alias in &descriptor.flag_aliases {
        if !seen_aliases.insert(alias) {
            errors.push(ValidationError::DuplicateFlagAlias {
                command: descriptor.id.clone(),
                name: alias.clone(),
            });
        }
        if long_names.contains(alias.as_str()) {
            errors.push(ValidationError::FlagNameCollision {
                command: descriptor.id.clone(),
                name: alias.clone(),
            });
        }
    }

    errors
}
