//! Static permission catalog.
//!
//! A catalog is the read-only hierarchy of every permission a role can be
//! granted. Leaves are concrete grantable actions; nodes with children are
//! groups whose state is always derived from their descendants.
//!
//! Internally the hierarchy is flattened in pre-order into an arena, so a
//! node's descendants occupy the contiguous index range
//! `index..subtree_end`, and every child has a larger index than its parent.
//! Selection trees reuse these indices as their node handles.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::CatalogError;

/// One point in the permission hierarchy, as supplied by the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionCatalogNode {
    /// Stable identifier, e.g. `"department.edit"`.
    pub id: String,
    /// Display name.
    pub label: String,
    /// Ordered children; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<PermissionCatalogNode>,
}

impl PermissionCatalogNode {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn group(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<PermissionCatalogNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CatalogEntry {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) depth: usize,
    pub(crate) subtree_end: usize,
}

impl CatalogEntry {
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A validated permission catalog, shared read-only by every editing session.
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    nodes: Vec<PermissionCatalogNode>,
    entries: Vec<CatalogEntry>,
    roots: Vec<usize>,
    index: HashMap<String, usize>,
}

impl PermissionCatalog {
    /// Validates and indexes a catalog.
    ///
    /// Fails if any id is empty or appears more than once anywhere in the
    /// hierarchy.
    pub fn new(nodes: Vec<PermissionCatalogNode>) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut roots = Vec::with_capacity(nodes.len());

        for node in &nodes {
            roots.push(flatten(node, None, 0, &mut entries, &mut index)?);
        }

        Ok(Self {
            nodes,
            entries,
            roots,
            index,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let nodes: Vec<PermissionCatalogNode> = serde_json::from_str(json)?;
        Self::new(nodes)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The catalog in its original nested shape.
    pub fn nodes(&self) -> &[PermissionCatalogNode] {
        &self.nodes
    }

    /// Total number of nodes, groups included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns `true` only for ids naming a grantable leaf.
    pub fn is_leaf(&self, id: &str) -> bool {
        self.index_of(id)
            .is_some_and(|idx| self.entries[idx].is_leaf())
    }

    /// Leaf ids in catalog order.
    pub fn leaf_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.is_leaf())
            .map(|entry| entry.id.as_str())
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.index_of(id).map(|idx| self.entries[idx].label.as_str())
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn entry(&self, idx: usize) -> &CatalogEntry {
        &self.entries[idx]
    }

    pub(crate) fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub(crate) fn root_indices(&self) -> &[usize] {
        &self.roots
    }
}

fn flatten(
    node: &PermissionCatalogNode,
    parent: Option<usize>,
    depth: usize,
    entries: &mut Vec<CatalogEntry>,
    index: &mut HashMap<String, usize>,
) -> Result<usize, CatalogError> {
    if node.id.trim().is_empty() {
        return Err(CatalogError::EmptyId {
            label: node.label.clone(),
        });
    }

    let idx = entries.len();
    if index.insert(node.id.clone(), idx).is_some() {
        return Err(CatalogError::DuplicateId(node.id.clone()));
    }

    entries.push(CatalogEntry {
        id: node.id.clone(),
        label: node.label.clone(),
        parent,
        children: Vec::with_capacity(node.children.len()),
        depth,
        subtree_end: idx + 1,
    });

    for child in &node.children {
        let child_idx = flatten(child, Some(idx), depth + 1, entries, index)?;
        entries[idx].children.push(child_idx);
    }

    entries[idx].subtree_end = entries.len();
    Ok(idx)
}
