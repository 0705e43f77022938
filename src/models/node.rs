//! Workspace Node Model
//!
//! Node entries for the workspace tree arena. Nodes are addressed by
//! [`NodeId`] (an index into the arena) rather than owned recursively, so
//! structural mutations never clone subtrees. Sibling names are unique and
//! children keep insertion order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Legal node names: no path separators, no leading/trailing whitespace.
static NODE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^/\\\s][^/\\]*$").unwrap());

/// Kind of a workspace node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Leaf entry, never has children
    File,
    /// Container entry with ordered children and open/closed state
    Directory,
}

impl NodeKind {
    /// Check if this is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }
}

/// Index of a node in the workspace arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One entry (file or directory) in the workspace tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Name, unique among siblings
    pub name: String,

    /// File or directory
    pub kind: NodeKind,

    /// Expanded state; meaningful only for directories
    pub is_open: bool,

    /// Parent node, `None` for top-level entries
    pub parent: Option<NodeId>,

    /// Children in insertion order; always empty for files
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create a new node with no parent or children
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_open: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }
}

/// Validate a candidate node name
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }

    if !NODE_NAME.is_match(name) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "name cannot contain path separators or start with whitespace".to_string(),
        });
    }

    Ok(())
}
