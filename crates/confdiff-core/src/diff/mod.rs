//! Diff data structures and the comparison engine.
//!
//! A [`Diff`] is an ordered sequence of [`DiffNode`]s describing one mapping
//! level. Nodes tagged [`NodeState::Nested`] carry the recursive comparison
//! of two sub-mappings; every other node carries exactly the values relevant
//! to its state. Renderers consume this tree without re-deriving anything.

mod object;
mod path;
mod primitives;

pub use path::Path;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DiffOptions, Mapping, Value};

/// Closed classification of a comparison outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Both sides hold mappings; see the node's children.
    Nested,
    /// Both sides hold equal values.
    Unchanged,
    /// Both sides hold values that differ.
    Changed,
    /// Only the after-document holds the key.
    Added,
    /// Only the before-document holds the key.
    Deleted,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested => f.write_str("nested"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Changed => f.write_str("changed"),
            Self::Added => f.write_str("added"),
            Self::Deleted => f.write_str("deleted"),
        }
    }
}

/// One key's comparison outcome.
///
/// Serializes with a `state` tag next to the key, e.g.
/// `{"state":"changed","key":"port","oldValue":80,"newValue":8080}`.
///
/// ```
/// # use confdiff_core::{diff::NodeState, DiffNode, Value};
/// let node = DiffNode::changed("port", Value::from(80), Value::from(8080));
/// assert_eq!(node.key(), "port");
/// assert_eq!(node.state(), NodeState::Changed);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DiffNode {
    /// Recursive comparison of two mappings stored under the same key.
    Nested {
        /// Mapping key.
        key: String,
        /// Comparison of the two sub-mappings.
        children: Vec<DiffNode>,
    },
    /// The key holds equal values on both sides.
    Unchanged {
        /// Mapping key.
        key: String,
        /// The shared value.
        value: Value,
    },
    /// The key holds different values.
    Changed {
        /// Mapping key.
        key: String,
        /// Value in the before-document.
        #[serde(rename = "oldValue")]
        old_value: Value,
        /// Value in the after-document.
        #[serde(rename = "newValue")]
        new_value: Value,
    },
    /// The key only exists in the after-document.
    Added {
        /// Mapping key.
        key: String,
        /// The after-value.
        value: Value,
    },
    /// The key only exists in the before-document.
    Deleted {
        /// Mapping key.
        key: String,
        /// The before-value.
        value: Value,
    },
}

impl DiffNode {
    /// Builds a [`DiffNode::Nested`] node.
    pub fn nested<S>(key: S, children: Vec<DiffNode>) -> Self
    where
        S: Into<String>,
    {
        Self::Nested { key: key.into(), children }
    }

    /// Builds a [`DiffNode::Unchanged`] node.
    pub fn unchanged<S>(key: S, value: Value) -> Self
    where
        S: Into<String>,
    {
        Self::Unchanged { key: key.into(), value }
    }

    /// Builds a [`DiffNode::Changed`] node.
    pub fn changed<S>(key: S, old_value: Value, new_value: Value) -> Self
    where
        S: Into<String>,
    {
        Self::Changed { key: key.into(), old_value, new_value }
    }

    /// Builds a [`DiffNode::Added`] node.
    pub fn added<S>(key: S, value: Value) -> Self
    where
        S: Into<String>,
    {
        Self::Added { key: key.into(), value }
    }

    /// Builds a [`DiffNode::Deleted`] node.
    pub fn deleted<S>(key: S, value: Value) -> Self
    where
        S: Into<String>,
    {
        Self::Deleted { key: key.into(), value }
    }

    /// The mapping key this node describes.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Nested { key, .. }
            | Self::Unchanged { key, .. }
            | Self::Changed { key, .. }
            | Self::Added { key, .. }
            | Self::Deleted { key, .. } => key,
        }
    }

    /// The node's state tag.
    #[must_use]
    pub fn state(&self) -> NodeState {
        match self {
            Self::Nested { .. } => NodeState::Nested,
            Self::Unchanged { .. } => NodeState::Unchanged,
            Self::Changed { .. } => NodeState::Changed,
            Self::Added { .. } => NodeState::Added,
            Self::Deleted { .. } => NodeState::Deleted,
        }
    }

    /// Indicates whether this node or any descendant records a difference.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Nested { children, .. } => children.iter().any(Self::has_changes),
            Self::Unchanged { .. } => false,
            Self::Changed { .. } | Self::Added { .. } | Self::Deleted { .. } => true,
        }
    }

    /// Returns the node describing the same key with before and after swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Nested { key, children } => {
                let children = children.iter().map(Self::reversed).collect();
                Self::Nested { key: key.clone(), children }
            }
            Self::Unchanged { .. } => self.clone(),
            Self::Changed { key, old_value, new_value } => Self::Changed {
                key: key.clone(),
                old_value: new_value.clone(),
                new_value: old_value.clone(),
            },
            Self::Added { key, value } => Self::Deleted { key: key.clone(), value: value.clone() },
            Self::Deleted { key, value } => Self::Added { key: key.clone(), value: value.clone() },
        }
    }
}

/// Ordered comparison result for one mapping level.
///
/// ```
/// # use confdiff_core::{Diff, DiffNode, Value};
/// let diff = Diff::from_nodes(vec![DiffNode::added("c", Value::from(4))]);
/// assert_eq!(diff.len(), 1);
/// assert!(diff.has_changes());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff {
    nodes: Vec<DiffNode>,
}

impl Diff {
    /// Constructs an empty diff.
    #[must_use]
    pub fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Builds a diff from the provided nodes.
    #[must_use]
    pub fn from_nodes(nodes: Vec<DiffNode>) -> Self {
        Self { nodes }
    }

    /// Returns the number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indicates whether the diff has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[DiffNode] {
        &self.nodes
    }

    /// Returns an iterator over the top-level nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffNode> {
        self.nodes.iter()
    }

    /// Consumes the diff and returns the nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<DiffNode> {
        self.nodes
    }

    /// Indicates whether any node records an addition, deletion, or change.
    ///
    /// ```
    /// # use confdiff_core::{DiffOptions, Mapping, Value};
    /// let doc: Mapping = [("a", Value::from(1))].into_iter().collect();
    /// assert!(!doc.diff(&doc, &DiffOptions::default()).has_changes());
    /// ```
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.nodes.iter().any(DiffNode::has_changes)
    }

    /// Swaps the roles of the two documents.
    ///
    /// Added nodes become deleted ones and vice versa, and changed nodes swap
    /// their old and new values. Key order is kept as is.
    ///
    /// ```
    /// # use confdiff_core::{Diff, DiffNode, Value};
    /// let diff = Diff::from_nodes(vec![DiffNode::added("c", Value::from(4))]);
    /// let reversed = diff.reverse();
    /// assert_eq!(reversed.nodes()[0], DiffNode::deleted("c", Value::from(4)));
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Diff {
        Diff::from_nodes(self.nodes.iter().map(DiffNode::reversed).collect())
    }

    /// Flattens the tree in pre-order, pairing every non-nested node with its
    /// full key path.
    ///
    /// ```
    /// # use confdiff_core::{DiffOptions, Value};
    /// let before = Value::from_json_str("{\"x\":{\"y\":1}}")?.into_mapping()?;
    /// let after = Value::from_json_str("{\"x\":{\"y\":2}}")?.into_mapping()?;
    /// let diff = before.diff(&after, &DiffOptions::default());
    /// let changes = diff.changes();
    /// assert_eq!(changes.len(), 1);
    /// assert_eq!(changes[0].0.to_string(), "x.y");
    /// # Ok::<(), confdiff_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn changes(&self) -> Vec<(Path, &DiffNode)> {
        let mut collected = Vec::new();
        collect_changes(&self.nodes, &mut Path::new(), &mut collected);
        collected
    }
}

fn collect_changes<'a>(
    nodes: &'a [DiffNode],
    path: &mut Path,
    out: &mut Vec<(Path, &'a DiffNode)>,
) {
    for node in nodes {
        path.push(node.key());
        match node {
            DiffNode::Nested { children, .. } => collect_changes(children, path, out),
            _ => out.push((path.clone(), node)),
        }
        path.pop();
    }
}

impl IntoIterator for Diff {
    type Item = DiffNode;
    type IntoIter = std::vec::IntoIter<DiffNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DiffNode;
    type IntoIter = std::slice::Iter<'a, DiffNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl From<Vec<DiffNode>> for Diff {
    fn from(value: Vec<DiffNode>) -> Self {
        Self::from_nodes(value)
    }
}

/// Compares two mappings and returns the annotated diff tree.
///
/// ```
/// # use confdiff_core::{diff::compare, DiffNode, DiffOptions, Value};
/// let before = Value::from_json_str("{\"a\":1,\"b\":2}")?.into_mapping()?;
/// let after = Value::from_json_str("{\"a\":1,\"b\":3,\"c\":4}")?.into_mapping()?;
/// let diff = compare(&before, &after, &DiffOptions::default());
/// assert_eq!(
///     diff.nodes(),
///     [
///         DiffNode::unchanged("a", Value::from(1)),
///         DiffNode::changed("b", Value::from(2), Value::from(3)),
///         DiffNode::added("c", Value::from(4)),
///     ]
/// );
/// # Ok::<(), confdiff_core::ParseError>(())
/// ```
#[must_use]
pub fn compare(before: &Mapping, after: &Mapping, options: &DiffOptions) -> Diff {
    tracing::debug!(
        before_keys = before.len(),
        after_keys = after.len(),
        key_order = %options.key_order(),
        "comparing documents"
    );
    Diff::from_nodes(object::diff_mappings(before, after, options))
}
