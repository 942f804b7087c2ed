//! Schema comparison and entity partitioning.
//!
//! Raw tree-diff ops are noise-filtered, then grouped under the command or
//! hook they belong to. The owning entity id is everything before the first
//! `.definitions` in the dotted path; the remainder, relative to that entity,
//! is what the user sees. The substring split is load-bearing for message
//! formatting and is kept even though a nested field named `definitions`
//! would fool it.

use command_snapshot_core::SchemaDocument;
use serde_json::Value;
use tracing::debug;

use crate::classify::{is_array_index, is_noise};
use crate::tree::{DeltaKind, DeltaOp, diff, join_path, value_at};

/// Messages for one command or hook, in op order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityChanges {
    /// Owning entity id, e.g. `commands.deploy:functions`.
    pub entity: String,
    /// Rendered change messages.
    pub messages: Vec<String>,
}

/// Result of comparing two schema documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaComparison {
    /// Surviving (non-noise) raw ops, for programmatic callers.
    pub ops: Vec<DeltaOp>,
    /// Rendered messages grouped by entity, in first-seen order.
    pub entities: Vec<EntityChanges>,
}

impl SchemaComparison {
    /// Returns `true` when any visible change was found.
    pub fn has_changes(&self) -> bool {
        !self.ops.is_empty()
    }

    /// Returns `true` when any surviving op removes a schema field.
    ///
    /// Removals are breaking changes and trigger the major-bump notice.
    pub fn has_removals(&self) -> bool {
        self.ops.iter().any(|op| op.kind == DeltaKind::Remove)
    }
}

/// Compares two schema documents and groups the delta by entity.
pub fn compare_schemas(current: &SchemaDocument, previous: &SchemaDocument) -> SchemaComparison {
    let current_value = current.to_value();
    let previous_value = previous.to_value();

    let raw = diff(&current_value, &previous_value);
    let ops: Vec<DeltaOp> = raw
        .into_iter()
        .filter(|op| !op.path.last().is_some_and(is_noise))
        .collect();
    debug!(ops = ops.len(), "schema ops after noise filtering");

    let entities = partition_ops(&ops, &current_value, &previous_value);
    SchemaComparison { ops, entities }
}

/// Groups ops by owning entity id and renders one message per op.
pub fn partition_ops(
    ops: &[DeltaOp],
    current: &Value,
    previous: &Value,
) -> Vec<EntityChanges> {
    let mut entities: Vec<EntityChanges> = Vec::new();

    for op in ops {
        let full_path = op.path_string();
        let entity = match full_path.find(".definitions") {
            Some(split) => full_path[..split].to_string(),
            None => full_path.clone(),
        };
        let message = render_message(op, &entity, &full_path, current, previous);

        match entities.iter_mut().find(|group| group.entity == entity) {
            Some(group) => group.messages.push(message),
            None => entities.push(EntityChanges {
                entity,
                messages: vec![message],
            }),
        }
    }

    entities
}

fn render_message(
    op: &DeltaOp,
    entity: &str,
    full_path: &str,
    current: &Value,
    previous: &Value,
) -> String {
    let readable = readable_path(full_path, entity);
    match op.kind {
        DeltaKind::Replace => {
            let existing = scalar_text(value_at(previous, &op.path));
            let latest = scalar_text(value_at(current, &op.path));
            format!("{readable} was changed from {existing} to {latest}")
        }
        DeltaKind::Add => {
            if op.path.last().is_some_and(is_array_index) {
                let base = readable_path(&join_path(&op.path[..op.path.len() - 1]), entity);
                format!("Array item at {base} was added to latest schema")
            } else {
                format!("{readable} was added to latest schema")
            }
        }
        DeltaKind::Remove => {
            if op.path.last().is_some_and(is_array_index) {
                let base = readable_path(&join_path(&op.path[..op.path.len() - 1]), entity);
                format!("Array item at {base} was not found in latest schema")
            } else {
                format!("{readable} was not found in latest schema")
            }
        }
    }
}

/// Strips the leading `"<entity>."` from a dotted path.
fn readable_path(full_path: &str, entity: &str) -> String {
    full_path
        .strip_prefix(&format!("{entity}."))
        .unwrap_or(full_path)
        .to_string()
}

/// Renders a looked-up scalar for interpolation: strings bare, other values
/// in their JSON form, missing lookups as `undefined`.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
