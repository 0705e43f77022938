//! Workspace Tree
//!
//! In-memory hierarchical namespace of files and directories backed by a
//! node-id-indexed arena. The tree is the sole owner of its nodes and of
//! their open/closed state; removing a directory frees its entire subtree.
//! All operations address nodes by full path from the root, are synchronous,
//! and either fully apply or leave the tree untouched.
//!
//! Which node is "selected" is deliberately not stored here: selection is
//! navigation state owned by the caller, so the tree stays reusable and
//! independently testable.

use crate::config::{SeedNode, WorkspaceConfig};
use crate::error::{Error, Result};
use crate::models::node::validate_name;
use crate::models::{Node, NodeId, NodeKind};

/// A row in the rendered tree: a visible node and its indentation depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// The visible node
    pub id: NodeId,
    /// Nesting depth, 0 for top-level entries
    pub depth: usize,
}

/// Hierarchical workspace namespace with path-addressed mutations
#[derive(Debug, Clone, Default)]
pub struct WorkspaceTree {
    /// Arena slots; freed slots are `None` and reusable
    slots: Vec<Option<Node>>,
    /// Indices of freed slots
    free: Vec<usize>,
    /// Top-level entries in insertion order
    roots: Vec<NodeId>,
}

impl WorkspaceTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree seeded from workspace configuration
    pub fn from_config(config: &WorkspaceConfig) -> Self {
        let mut tree = Self::new();
        tree.seed_level(None, &config.seed);
        tree
    }

    /// Seed one sibling level, recursing into directories
    fn seed_level(&mut self, parent: Option<NodeId>, seeds: &[SeedNode]) {
        for seed in seeds {
            let mut node = Node::new(seed.name.clone(), seed.kind);
            node.is_open = seed.kind.is_directory() && seed.open;
            node.parent = parent;

            let id = self.alloc(node);
            match parent {
                Some(parent_id) => self.slot_mut(parent_id).children.push(id),
                None => self.roots.push(id),
            }

            self.seed_level(Some(id), &seed.children);
        }
    }

    /// Store a node, reusing a freed slot when available
    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Live node for an id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Mutable access to a live slot. Panics on a dangling id; ids handed
    /// out by resolution are always live because the tree is the sole owner.
    fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0].as_mut().expect("dangling node id")
    }

    /// Top-level entries in order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of a node in order; empty for files and unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Resolve a full path from the root to a node id.
    ///
    /// Walks sibling name lists level by level. Returns `None` if any
    /// segment is missing or a non-final segment is a file (files have no
    /// children, so the walk dead-ends naturally).
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        let mut level: &[NodeId] = &self.roots;
        let mut found = None;

        for segment in path {
            let id = level
                .iter()
                .copied()
                .find(|id| self.node(*id).map(|n| n.name == segment.as_ref()).unwrap_or(false))?;
            level = self.children(id);
            found = Some(id);
        }

        found
    }

    /// Full path of a live node, root segment first
    pub fn path_of(&self, id: NodeId) -> Vec<String> {
        let mut segments = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let Some(node) = self.node(current) else { break };
            segments.push(node.name.clone());
            cursor = node.parent;
        }

        segments.reverse();
        segments
    }

    /// Flip a directory's open state.
    ///
    /// Resolution failures and file targets are silent no-ops (permissive
    /// navigation). Returns whether a flip happened.
    pub fn toggle<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        let Some(id) = self.resolve(path) else {
            return false;
        };

        if !self.slot_mut(id).is_directory() {
            return false;
        }

        let node = self.slot_mut(id);
        node.is_open = !node.is_open;
        debug!(name = %node.name, open = node.is_open, "toggled directory");
        true
    }

    /// Create a new node under `parent_path` (the root level when empty).
    ///
    /// The new node is appended to the end of the sibling list. Fails with
    /// no mutation on an invalid name, an unresolvable parent, a file
    /// parent, or a sibling name collision.
    pub fn create<S: AsRef<str>>(
        &mut self,
        parent_path: &[S],
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId> {
        validate_name(name)?;

        let parent = if parent_path.is_empty() {
            None
        } else {
            let id = self.resolve(parent_path).ok_or_else(|| Error::NodeNotFound {
                path: join_path(parent_path),
            })?;
            if !self.slot_mut(id).is_directory() {
                return Err(Error::NotADirectory {
                    path: join_path(parent_path),
                });
            }
            Some(id)
        };

        let siblings: &[NodeId] = match parent {
            Some(id) => self.children(id),
            None => &self.roots,
        };
        if siblings
            .iter()
            .any(|id| self.node(*id).map(|n| n.name == name).unwrap_or(false))
        {
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut node = Node::new(name, kind);
        node.parent = parent;
        let id = self.alloc(node);

        match parent {
            Some(parent_id) => self.slot_mut(parent_id).children.push(id),
            None => self.roots.push(id),
        }

        debug!(name, ?kind, "created node");
        Ok(id)
    }

    /// Remove the node at `path` together with its entire subtree.
    ///
    /// An unresolvable path is an explicit error so callers can surface it.
    pub fn remove<S: AsRef<str>>(&mut self, path: &[S]) -> Result<()> {
        let id = self.resolve(path).ok_or_else(|| Error::NodeNotFound {
            path: join_path(path),
        })?;

        // Detach from the parent's child list (or the root list)
        let parent = self.node(id).and_then(|n| n.parent);
        match parent {
            Some(parent_id) => self.slot_mut(parent_id).children.retain(|c| *c != id),
            None => self.roots.retain(|c| *c != id),
        }

        // Free the subtree
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots[current.0].take() {
                stack.extend(node.children);
                self.free.push(current.0);
            }
        }

        debug!(path = %join_path(path), "removed subtree");
        Ok(())
    }

    /// Depth-first visible rows for a renderer: top-level entries always,
    /// a directory's children only while it is open.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        // Reverse so the stack pops siblings in insertion order
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|id| (*id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            rows.push(VisibleRow { id, depth });

            if let Some(node) = self.node(id) {
                if node.is_directory() && node.is_open {
                    stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
                }
            }
        }

        rows
    }
}

/// Join path segments for error messages
fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}
