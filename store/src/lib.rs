//! Snapshot and schema persistence.
//!
//! This crate owns every file format the tool reads or writes:
//!
//! - the registry snapshot file ([`load_snapshot`], [`save_snapshot`]),
//! - schema directories in single-file or per-command layout, including
//!   versioned trees ([`load_schema_document`], [`save_schema_document`]),
//! - the collaborator manifests ([`RegistryManifest`],
//!   [`load_schema_manifest`]).
//!
//! Missing previous-side inputs load as `None` — a first run has nothing to
//! compare against — while corrupt input propagates as a [`StoreError`] and
//! aborts the run.

mod error;
mod manifest;
mod registry;
mod schema;

pub use error::{Result, StoreError};
pub use manifest::{RegistryManifest, load_schema_manifest};
pub use registry::{load_snapshot, resolve_version_path, save_snapshot};
pub use schema::{load_schema_document, save_schema_document};
