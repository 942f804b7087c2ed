//! Generic tree diff over JSON values.
//!
//! [`diff`] walks two arbitrary JSON values structurally and emits the edit
//! set that turns the previous document into the current one. Array elements
//! are compared strictly by position; an insertion in the middle of an array
//! therefore shows up as index-level changes from that position on, not as a
//! move. Output order is deterministic: removes first (highest path last
//! discovered applied first), then replaces, then adds, with object keys
//! visited in sorted order and array indices ascending.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step into a nested JSON value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl PathSegment {
    /// Borrows the key name, if this segment is an object key.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Kind of edit described by a [`DeltaOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaKind {
    /// Present in current, absent from previous.
    Add,
    /// Present in previous, absent from current.
    Remove,
    /// Present in both with different values.
    Replace,
}

/// One edit in the computed delta.
///
/// `value` carries the current document's subtree for `add` and `replace`;
/// it is absent for `remove`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaOp {
    /// Edit kind.
    #[serde(rename = "op")]
    pub kind: DeltaKind,
    /// Path into the current document (previous for `remove`).
    pub path: Vec<PathSegment>,
    /// Subtree from the current document, when the op carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl DeltaOp {
    /// Renders the path as a dot-joined string, array indices included.
    pub fn path_string(&self) -> String {
        join_path(&self.path)
    }
}

/// Joins path segments with `.`.
pub fn join_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&segment.to_string());
    }
    out
}

/// Computes the edit set between two JSON values.
///
/// Applying the returned ops to `previous`, in order, yields `current`.
pub fn diff(current: &Value, previous: &Value) -> Vec<DeltaOp> {
    let mut buckets = Buckets::default();
    walk(current, previous, &mut Vec::new(), &mut buckets);
    buckets.into_ops()
}

/// Resolves a delta path against a document.
///
/// Returns `None` when any segment is missing, which the caller renders as
/// an undefined value.
pub fn value_at<'a>(root: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    let mut node = root;
    for segment in path {
        node = match segment {
            PathSegment::Key(key) => node.as_object()?.get(key)?,
            PathSegment::Index(index) => node.as_array()?.get(*index)?,
        };
    }
    Some(node)
}

#[derive(Default)]
struct Buckets {
    removes: Vec<DeltaOp>,
    replaces: Vec<DeltaOp>,
    adds: Vec<DeltaOp>,
}

impl Buckets {
    fn into_ops(mut self) -> Vec<DeltaOp> {
        // Removes apply highest-index-first so earlier ops do not shift the
        // positions later ones refer to.
        self.removes.reverse();
        let mut ops = self.removes;
        ops.append(&mut self.replaces);
        ops.append(&mut self.adds);
        ops
    }
}

fn walk(current: &Value, previous: &Value, path: &mut Vec<PathSegment>, buckets: &mut Buckets) {
    match (current, previous) {
        (Value::Object(cur), Value::Object(prev)) => {
            let keys: BTreeSet<&String> = cur.keys().chain(prev.keys()).collect();
            for key in keys {
                path.push(PathSegment::Key(key.clone()));
                match (cur.get(key), prev.get(key)) {
                    (Some(c), Some(p)) => walk(c, p, path, buckets),
                    (Some(c), None) => buckets.adds.push(DeltaOp {
                        kind: DeltaKind::Add,
                        path: path.clone(),
                        value: Some(c.clone()),
                    }),
                    (None, Some(_)) => buckets.removes.push(DeltaOp {
                        kind: DeltaKind::Remove,
                        path: path.clone(),
                        value: None,
                    }),
                    (None, None) => unreachable!("key came from one of the two maps"),
                }
                path.pop();
            }
        }
        (Value::Array(cur), Value::Array(prev)) => {
            for index in 0..cur.len().max(prev.len()) {
                path.push(PathSegment::Index(index));
                match (cur.get(index), prev.get(index)) {
                    (Some(c), Some(p)) => walk(c, p, path, buckets),
                    (Some(c), None) => buckets.adds.push(DeltaOp {
                        kind: DeltaKind::Add,
                        path: path.clone(),
                        value: Some(c.clone()),
                    }),
                    (None, Some(_)) => buckets.removes.push(DeltaOp {
                        kind: DeltaKind::Remove,
                        path: path.clone(),
                        value: None,
                    }),
                    (None, None) => unreachable!("index is below one of the two lengths"),
                }
                path.pop();
            }
        }
        // Scalar against scalar, or a kind mismatch: replace the whole
        // subtree with the current side.
        _ => {
            if current != previous {
                buckets.replaces.push(DeltaOp {
                    kind: DeltaKind::Replace,
                    path: path.clone(),
                    value: Some(current.clone()),
                });
            }
        }
    }
}
