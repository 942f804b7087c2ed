//! Change detection and classification for command snapshots.
//!
//! Two pipelines share one generic engine:
//!
//! - **Registry diff**: [`compare_registry`] matches commands between two
//!   [`RegistrySnapshot`](command_snapshot_core::RegistrySnapshot)s by id and
//!   plugin and diffs their flag, short-form, and alias families with
//!   [`diff_property`], producing a [`ComparisonReport`].
//! - **Schema diff**: [`compare_schemas`] runs the generic tree differ
//!   ([`diff`]) over two
//!   [`SchemaDocument`](command_snapshot_core::SchemaDocument)s, drops noise
//!   keys, and partitions the ops by owning command or hook into a
//!   [`SchemaComparison`].
//!
//! [`render_registry_report`] and [`render_schema_comparison`] turn either
//! result into the fixed text templates or a JSON/YAML value, and both
//! reports answer the breaking-change question through `has_removals`: any
//! removal requires a major version bump.
//!
//! # Example
//!
//! ```
//! use command_snapshot_core::{CommandDescriptor, RegistrySnapshot};
//! use command_snapshot_diff::{OutputFormat, compare_registry, render_registry_report};
//!
//! let previous = RegistrySnapshot::from_entries(vec![
//!     CommandDescriptor::new("foo", "plugin-foo").with_flags(["a"]),
//! ]);
//! let current = RegistrySnapshot::from_entries(vec![
//!     CommandDescriptor::new("foo", "plugin-foo").with_flags(["a", "b"]),
//!     CommandDescriptor::new("bar", "plugin-bar"),
//! ]);
//!
//! let report = compare_registry(&previous, &current);
//! assert_eq!(report.added_commands, vec!["bar"]);
//! assert!(report.has_changes());
//! assert!(!report.has_removals());
//!
//! let text = render_registry_report(&report, OutputFormat::Text).unwrap();
//! assert!(text.contains("\t+bar"));
//! ```

mod classify;
mod registry;
mod render;
mod schema;
mod tree;

pub use classify::{is_array_index, is_noise};
pub use registry::{
    CommandChanges, ComparisonReport, PropertyDiff, compare_registry, diff_property,
};
pub use render::{OutputFormat, render_registry_report, render_schema_comparison};
pub use schema::{EntityChanges, SchemaComparison, compare_schemas, partition_ops};
pub use tree::{DeltaKind, DeltaOp, PathSegment, diff, join_path, value_at};
