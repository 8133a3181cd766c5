//! # Permission Tree
//!
//! The declaration of every permission in the system, as a nested mapping
//! whose leaves are permission identifiers. Key names only organise the
//! tree; leaf values carry all the meaning.
//!
//! ```text
//! {
//!   "orders": { "read": "orders.read", "write": "orders.write" },
//!   "users":  { "profile": { "write": "users.profile.write" } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::permission::PermissionId;

/// A node of the permission tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PermissionNode {
    /// A declared permission.
    Leaf(PermissionId),
    /// A nested mapping.
    Branch(PermissionTree),
    /// A sequence of nodes, each walked in order.
    List(Vec<PermissionNode>),
    /// Any other value (number, bool, null). Skipped when flattening.
    Ignored(Value),
}

impl PermissionNode {
    fn flatten_into(&self, acc: &mut Vec<PermissionId>) {
        match self {
            PermissionNode::Leaf(id) => acc.push(id.clone()),
            PermissionNode::Branch(tree) => {
                for (_, node) in &tree.entries {
                    node.flatten_into(acc);
                }
            }
            PermissionNode::List(nodes) => {
                for node in nodes {
                    node.flatten_into(acc);
                }
            }
            PermissionNode::Ignored(_) => {}
        }
    }
}

impl From<Value> for PermissionNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) => PermissionNode::Leaf(PermissionId::from(id)),
            Value::Object(map) => PermissionNode::Branch(PermissionTree::from(map)),
            Value::Array(values) => {
                PermissionNode::List(values.into_iter().map(PermissionNode::from).collect())
            }
            other => PermissionNode::Ignored(other),
        }
    }
}

impl From<PermissionNode> for Value {
    fn from(node: PermissionNode) -> Self {
        match node {
            PermissionNode::Leaf(id) => Value::String(id.into_string()),
            PermissionNode::Branch(tree) => Value::Object(tree.into()),
            PermissionNode::List(nodes) => Value::Array(nodes.into_iter().map(Value::from).collect()),
            PermissionNode::Ignored(value) => value,
        }
    }
}

impl From<PermissionId> for PermissionNode {
    fn from(id: PermissionId) -> Self {
        PermissionNode::Leaf(id)
    }
}

impl From<&str> for PermissionNode {
    fn from(id: &str) -> Self {
        PermissionNode::Leaf(PermissionId::new(id))
    }
}

impl From<PermissionTree> for PermissionNode {
    fn from(tree: PermissionTree) -> Self {
        PermissionNode::Branch(tree)
    }
}

/// The hierarchical declaration of all valid permissions.
///
/// Entries keep their insertion (or document) order. The tree is built once
/// by the caller and only read afterwards.
///
/// # Example
///
/// ```
/// use permitted_core::tree::PermissionTree;
///
/// let tree = PermissionTree::new()
///     .with("orders", PermissionTree::new()
///         .with("read", "orders.read")
///         .with("write", "orders.write"))
///     .with("users", PermissionTree::new().with("read", "users.read"));
///
/// let all: Vec<String> = tree.flatten().into_iter().map(|p| p.into_string()).collect();
/// assert_eq!(all, vec!["orders.read", "orders.write", "users.read"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PermissionTree {
    entries: Vec<(String, PermissionNode)>,
}

impl PermissionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a tree from an arbitrary JSON value.
    ///
    /// An object becomes the tree itself. Any other root is kept as a single
    /// unnamed entry, so a bare string root still declares one permission.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from(map),
            other => Self {
                entries: vec![(String::new(), PermissionNode::from(other))],
            },
        }
    }

    /// Insert a node under `key`, replacing any node already there.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<PermissionNode>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
    }

    /// Builder form of [`PermissionTree::insert`].
    pub fn with(mut self, key: impl Into<String>, node: impl Into<PermissionNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Look up a direct child by key.
    pub fn get(&self, key: &str) -> Option<&PermissionNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// Iterate over the direct children in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PermissionNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the tree has no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every permission declared in the tree, depth-first, in tree order.
    ///
    /// Arrays are walked like mappings; numbers, booleans and nulls are
    /// skipped. Duplicate leaves are emitted as many times as they appear.
    pub fn flatten(&self) -> Vec<PermissionId> {
        let mut acc = Vec::new();
        for (_, node) in &self.entries {
            node.flatten_into(&mut acc);
        }
        acc
    }
}

/// Flatten a tree into its declared permissions.
///
/// Free-function form of [`PermissionTree::flatten`].
pub fn flatten(tree: &PermissionTree) -> Vec<PermissionId> {
    tree.flatten()
}

impl From<Map<String, Value>> for PermissionTree {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, PermissionNode::from(value)))
                .collect(),
        }
    }
}

impl From<PermissionTree> for Map<String, Value> {
    fn from(tree: PermissionTree) -> Self {
        tree.entries
            .into_iter()
            .map(|(key, node)| (key, Value::from(node)))
            .collect()
    }
}
