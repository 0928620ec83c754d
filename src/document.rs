//! Editable document trees for record editing.
//!
//! A record opened for editing is converted into a graph of shared, mutable
//! nodes so it can be defensively cloned and then patched in place from the
//! flat dotted-path map a submitted form produces. The caller's original
//! record is never touched: the form adapter clones first and merges into
//! the clone.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;

/// Shared handle to a document node.
pub type NodeRef = Rc<RefCell<Node>>;

/// A JSON-like value graph. Unlike `serde_json::Value` the nodes are shared
/// and mutable, so a node reachable through two paths stays one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<NodeRef>),
    Record(BTreeMap<String, NodeRef>),
}

/// Builds a document from a JSON value. Every node is freshly allocated.
pub fn from_json(value: &Value) -> NodeRef {
    let node = match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Number(n) => Node::Number(n.clone()),
        Value::String(s) => Node::Text(s.clone()),
        Value::Array(items) => Node::List(items.iter().map(from_json).collect()),
        Value::Object(entries) => Node::Record(
            entries
                .iter()
                .map(|(key, val)| (key.clone(), from_json(val)))
                .collect(),
        ),
    };
    Rc::new(RefCell::new(node))
}

/// Converts a document back to a JSON value. The document must be acyclic;
/// the edit flow only ever builds trees out of `from_json`.
pub fn to_json(node: &NodeRef) -> Value {
    match &*node.borrow() {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::Text(s) => Value::String(s.clone()),
        Node::List(items) => Value::Array(items.iter().map(to_json).collect()),
        Node::Record(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, val)| (key.clone(), to_json(val)))
                .collect(),
        ),
    }
}

/// Deep-clones a document, preserving its sharing structure: a node
/// reachable through two paths in the source is cloned once and shared the
/// same way in the copy. The visited map is scoped to one call, which also
/// makes the clone terminate on cyclic graphs. The source is never mutated.
pub fn deep_clone(node: &NodeRef) -> NodeRef {
    let mut visited: HashMap<*const RefCell<Node>, NodeRef> = HashMap::new();
    clone_node(node, &mut visited)
}

fn clone_node(node: &NodeRef, visited: &mut HashMap<*const RefCell<Node>, NodeRef>) -> NodeRef {
    if let Some(existing) = visited.get(&Rc::as_ptr(node)) {
        return existing.clone();
    }
    // Register a placeholder before descending so aliases and cycles
    // resolve to this copy instead of recursing forever.
    let copy: NodeRef = Rc::new(RefCell::new(Node::Null));
    visited.insert(Rc::as_ptr(node), copy.clone());

    let cloned = match &*node.borrow() {
        Node::Null => Node::Null,
        Node::Bool(b) => Node::Bool(*b),
        Node::Number(n) => Node::Number(n.clone()),
        Node::Text(s) => Node::Text(s.clone()),
        Node::List(items) => Node::List(
            items
                .iter()
                .map(|item| clone_node(item, visited))
                .collect(),
        ),
        Node::Record(entries) => Node::Record(
            entries
                .iter()
                .map(|(key, val)| (key.clone(), clone_node(val, visited)))
                .collect(),
        ),
    };
    *copy.borrow_mut() = cloned;
    copy
}

// ============================================================================
// Field Paths
// ============================================================================

/// A dotted path into a record, held as explicit key segments
/// (e.g. `location.street.number` -> `["location", "street", "number"]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path. Empty segments are dropped, so `""` parses to
    /// the empty path.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

// ============================================================================
// Path Merge
// ============================================================================

/// Why a dotted-path write-back failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("cannot assign to an empty path")]
    EmptyPath,
    #[error("path `{path}`: segment `{segment}` does not exist")]
    MissingSegment { path: String, segment: String },
    #[error("path `{path}`: parent of segment `{segment}` is not a record")]
    NotARecord { path: String, segment: String },
}

/// Writes `value` at `path`, walking existing intermediate records. The
/// merge never creates missing containers: an absent or untraversable
/// segment is a deterministic error naming the segment.
pub fn set_path(target: &NodeRef, path: &FieldPath, value: &Value) -> Result<(), MergeError> {
    let (leaf, parents) = path
        .segments()
        .split_last()
        .ok_or(MergeError::EmptyPath)?;

    let mut current = target.clone();
    for segment in parents {
        let next = match &*current.borrow() {
            Node::Record(entries) => {
                entries
                    .get(segment)
                    .cloned()
                    .ok_or_else(|| MergeError::MissingSegment {
                        path: path.to_string(),
                        segment: segment.clone(),
                    })?
            }
            _ => {
                return Err(MergeError::NotARecord {
                    path: path.to_string(),
                    segment: segment.clone(),
                })
            }
        };
        current = next;
    }

    let result = match &mut *current.borrow_mut() {
        Node::Record(entries) => {
            entries.insert(leaf.clone(), from_json(value));
            Ok(())
        }
        _ => Err(MergeError::NotARecord {
            path: path.to_string(),
            segment: leaf.clone(),
        }),
    };
    result
}

/// Applies a flat dotted-path map onto `target`. The first failing path
/// aborts the whole merge; callers merge into a discardable clone, so an
/// aborted merge leaves the source record untouched. Paths are expected to
/// be disjoint leaves — aliasing paths (one a prefix of another) are not
/// supported.
pub fn apply_values(
    target: &NodeRef,
    values: &HashMap<String, Value>,
) -> Result<(), MergeError> {
    for (path, value) in values {
        set_path(target, &FieldPath::parse(path), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let value = json!({
            "name": { "first": "Ada", "last": "Lovelace" },
            "tags": ["admin", "ops"],
            "active": true,
            "logins": 42,
        });
        assert_eq!(to_json(&from_json(&value)), value);
    }

    #[test]
    fn test_clone_is_independent_of_source() {
        let source = from_json(&json!({ "a": { "b": 1, "c": 2 } }));
        let copy = deep_clone(&source);
        set_path(&copy, &FieldPath::parse("a.b"), &json!(99)).unwrap();

        assert_eq!(to_json(&source), json!({ "a": { "b": 1, "c": 2 } }));
        assert_eq!(to_json(&copy), json!({ "a": { "b": 99, "c": 2 } }));
    }

    #[test]
    fn test_clone_preserves_shared_nodes() {
        let shared = from_json(&json!({ "x": 1 }));
        let mut entries = BTreeMap::new();
        entries.insert("first".to_string(), shared.clone());
        entries.insert("second".to_string(), shared);
        let source: NodeRef = Rc::new(RefCell::new(Node::Record(entries)));

        let copy = deep_clone(&source);
        let (first, second) = match &*copy.borrow() {
            Node::Record(entries) => (
                entries.get("first").unwrap().clone(),
                entries.get("second").unwrap().clone(),
            ),
            other => panic!("expected a record, got {:?}", other),
        };

        // Still one node reachable through both keys, but a new one.
        assert!(Rc::ptr_eq(&first, &second));
        match &*source.borrow() {
            Node::Record(entries) => {
                assert!(!Rc::ptr_eq(entries.get("first").unwrap(), &first));
            }
            _ => unreachable!(),
        };
    }

    #[test]
    fn test_clone_terminates_on_cycles() {
        let node: NodeRef = Rc::new(RefCell::new(Node::Record(BTreeMap::new())));
        match &mut *node.borrow_mut() {
            Node::Record(entries) => {
                entries.insert("me".to_string(), node.clone());
            }
            _ => unreachable!(),
        }

        let copy = deep_clone(&node);
        match &*copy.borrow() {
            Node::Record(entries) => {
                // The cycle points back into the copy, not into the source.
                assert!(Rc::ptr_eq(entries.get("me").unwrap(), &copy));
                assert!(!Rc::ptr_eq(entries.get("me").unwrap(), &node));
            }
            _ => unreachable!(),
        };
    }

    #[test]
    fn test_set_path_leaves_siblings_alone() {
        let target = from_json(&json!({ "a": { "b": 1, "c": 2 } }));
        set_path(&target, &FieldPath::parse("a.b"), &json!(5)).unwrap();
        assert_eq!(to_json(&target), json!({ "a": { "b": 5, "c": 2 } }));
    }

    #[test]
    fn test_set_path_reports_missing_segment() {
        let target = from_json(&json!({ "a": { "b": 1 } }));
        let err = set_path(&target, &FieldPath::parse("a.x.y"), &json!(5)).unwrap_err();
        assert_eq!(
            err,
            MergeError::MissingSegment {
                path: "a.x.y".to_string(),
                segment: "x".to_string(),
            }
        );
    }

    #[test]
    fn test_set_path_reports_untraversable_segment() {
        let target = from_json(&json!({ "a": 1 }));
        let err = set_path(&target, &FieldPath::parse("a.b"), &json!(5)).unwrap_err();
        assert_eq!(
            err,
            MergeError::NotARecord {
                path: "a.b".to_string(),
                segment: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_path_is_an_error() {
        let target = from_json(&json!({}));
        assert_eq!(
            set_path(&target, &FieldPath::parse(""), &json!(1)),
            Err(MergeError::EmptyPath)
        );
    }

    #[test]
    fn test_apply_values_aborts_on_first_failure() {
        let target = from_json(&json!({ "a": { "b": 1 } }));
        let mut values = HashMap::new();
        values.insert("a.missing.leaf".to_string(), json!(2));
        assert!(apply_values(&target, &values).is_err());
        assert_eq!(to_json(&target), json!({ "a": { "b": 1 } }));
    }

    #[test]
    fn test_apply_values_writes_disjoint_leaves() {
        let target = from_json(&json!({
            "name": { "first": "", "last": "" },
            "email": "",
        }));
        let mut values = HashMap::new();
        values.insert("name.first".to_string(), json!("Ada"));
        values.insert("email".to_string(), json!("ada@example.com"));
        apply_values(&target, &values).unwrap();

        assert_eq!(
            to_json(&target),
            json!({
                "name": { "first": "Ada", "last": "" },
                "email": "ada@example.com",
            })
        );
    }

    #[test]
    fn test_field_path_display() {
        let path = FieldPath::parse("location.street.number");
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "location.street.number");
    }
}
