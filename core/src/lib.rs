//! Core types and rules shared by the snapshot and schema pipelines.
//!
//! This crate defines the data model for capturing a CLI's public command
//! surface:
//!
//! - [`CommandDescriptor`] — one command's id, owning plugin, flags,
//!   short-flag characters, flag aliases, and command aliases.
//! - [`RegistrySnapshot`] — the persisted, id-sorted list of descriptors.
//! - [`SchemaDocument`] — generated JSON schemas keyed by command or hook id.
//! - [`ChangeEntry`] — a name tagged with its added/removed transition.
//!
//! Validation ([`validate_descriptor`]) enforces the per-command invariant
//! that flag long names, short characters, and aliases stay pairwise
//! disjoint. The filename codec ([`schema_file_name`], [`id_from_file_name`])
//! maps colon-delimited ids to filesystem-safe schema file names and back.
//! Snapshot building ([`build_snapshot`]) turns a [`CommandSource`] into a
//! validated, deterministic snapshot.
//!
//! # Example
//!
//! ```
//! use command_snapshot_core::*;
//!
//! let descriptor = CommandDescriptor::new("deploy:functions", "plugin-deploy")
//!     .with_flags(["force", "json"])
//!     .with_flag_chars(["f"])
//!     .with_aliases(["deploy:fn"]);
//! assert!(validate_descriptor(&descriptor).is_empty());
//!
//! let snapshot = RegistrySnapshot::from_entries(vec![descriptor]);
//! assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec!["deploy:functions"]);
//!
//! assert_eq!(schema_file_name("deploy:functions"), "deploy-functions.json");
//! ```

mod filename;
mod registry;
mod types;
mod validate;

pub use filename::{id_from_file_name, schema_file_name};
pub use registry::{CommandSource, build_snapshot};
pub use types::*;
pub use validate::{ValidationError, validate_descriptor};
