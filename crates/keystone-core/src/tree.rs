//! Tri-state permission selection tree.
//!
//! A [`PermissionTree`] mirrors a [`PermissionCatalog`] node for node and adds
//! a [`CheckStatus`] to each one. Leaves are only ever checked or unchecked;
//! groups are derived from their children:
//!
//! - `Checked` iff every child is checked
//! - `Unchecked` iff every child is unchecked
//! - `Partial` otherwise
//!
//! That rule holds after construction and after every mutation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keystone_core::catalog::{PermissionCatalog, PermissionCatalogNode};
//! use keystone_core::projection::build_tree;
//! use keystone_core::tree::CheckStatus;
//!
//! let catalog = Arc::new(PermissionCatalog::new(vec![PermissionCatalogNode::group(
//!     "role",
//!     "Role",
//!     vec![
//!         PermissionCatalogNode::leaf("role.read", "Read"),
//!         PermissionCatalogNode::leaf("role.edit", "Edit"),
//!     ],
//! )]).unwrap());
//!
//! let mut tree = build_tree(catalog, std::iter::empty::<&str>());
//! tree.toggle("role.read").unwrap();
//! assert_eq!(tree.status("role"), Some(CheckStatus::Partial));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::catalog::PermissionCatalog;
use crate::errors::TreeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Unchecked,
    Checked,
    /// Some but not all descendants are checked. Only groups can be partial.
    Partial,
}

impl CheckStatus {
    /// Status a node takes when the operator clicks it.
    ///
    /// A partial node always lands on `Checked`; nothing toggles into `Partial`.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CheckStatus::Checked => CheckStatus::Unchecked,
            CheckStatus::Unchecked | CheckStatus::Partial => CheckStatus::Checked,
        }
    }

    #[inline]
    pub fn is_checked(self) -> bool {
        self == CheckStatus::Checked
    }

    /// Derives a group's status from its immediate children.
    pub fn from_children<I>(children: I) -> Self
    where
        I: IntoIterator<Item = CheckStatus>,
    {
        let mut any_checked = false;
        let mut any_unchecked = false;

        for status in children {
            match status {
                CheckStatus::Checked => any_checked = true,
                CheckStatus::Unchecked => any_unchecked = true,
                CheckStatus::Partial => return CheckStatus::Partial,
            }
            if any_checked && any_unchecked {
                return CheckStatus::Partial;
            }
        }

        if any_checked {
            CheckStatus::Checked
        } else {
            CheckStatus::Unchecked
        }
    }
}

/// Selection state for one editing session.
///
/// Owned exclusively by the session that built it. The catalog behind it is
/// shared and never mutated.
#[derive(Debug, Clone)]
pub struct PermissionTree {
    catalog: Arc<PermissionCatalog>,
    statuses: Vec<CheckStatus>,
    stale_grants: Vec<String>,
}

impl PermissionTree {
    /// Builds a tree from per-node leaf statuses and derives every group.
    pub(crate) fn from_leaf_statuses(
        catalog: Arc<PermissionCatalog>,
        statuses: Vec<CheckStatus>,
        stale_grants: Vec<String>,
    ) -> Self {
        let mut tree = Self {
            catalog,
            statuses,
            stale_grants,
        };
        tree.recompute_groups();
        tree
    }

    pub fn catalog(&self) -> &Arc<PermissionCatalog> {
        &self.catalog
    }

    /// Granted ids that were ignored when the tree was built because the
    /// catalog has no leaf by that name.
    pub fn stale_grants(&self) -> &[String] {
        &self.stale_grants
    }

    pub fn status(&self, id: &str) -> Option<CheckStatus> {
        self.catalog.index_of(id).map(|idx| self.statuses[idx])
    }

    pub fn node(&self, id: &str) -> Option<TreeNodeRef<'_>> {
        self.catalog
            .index_of(id)
            .map(|index| TreeNodeRef { tree: self, index })
    }

    pub fn roots(&self) -> impl Iterator<Item = TreeNodeRef<'_>> {
        self.catalog
            .root_indices()
            .iter()
            .map(move |&index| TreeNodeRef { tree: self, index })
    }

    /// Every node in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = TreeNodeRef<'_>> {
        (0..self.statuses.len()).map(move |index| TreeNodeRef { tree: self, index })
    }

    /// Flips one node and propagates the change through the tree.
    ///
    /// The target's whole subtree is forced to the new status, then every
    /// ancestor up to the root is recomputed from its children. Returns the
    /// target's new status.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if `id` is not part of this tree. The tree is
    /// left untouched in that case.
    pub fn toggle(&mut self, id: &str) -> Result<CheckStatus, TreeError> {
        let Some(idx) = self.catalog.index_of(id) else {
            error!(node_id = %id, "toggle target is not part of the permission tree");
            return Err(TreeError::NotFound(id.to_string()));
        };

        let next = self.statuses[idx].toggled();
        self.force_subtree(idx, next);
        self.recompute_ancestors(idx);

        debug!(node_id = %id, status = ?next, "toggled permission node");
        debug_assert!(self.is_coherent());
        Ok(next)
    }

    /// Checks every node.
    pub fn select_all(&mut self) {
        self.force_roots(CheckStatus::Checked);
    }

    /// Unchecks every node.
    pub fn clear_all(&mut self) {
        self.force_roots(CheckStatus::Unchecked);
    }

    /// Returns `true` when no leaf is partial and every group matches the
    /// status derived from its children.
    pub fn is_coherent(&self) -> bool {
        self.catalog
            .entries()
            .iter()
            .enumerate()
            .all(|(idx, entry)| {
                if entry.is_leaf() {
                    self.statuses[idx] != CheckStatus::Partial
                } else {
                    self.statuses[idx] == self.derived_status(idx)
                }
            })
    }

    /// Nested snapshot for renderers.
    pub fn view(&self) -> Vec<PermissionTreeNodeView> {
        self.roots().map(|node| node.view()).collect()
    }

    pub(crate) fn leaf_statuses(&self) -> impl Iterator<Item = (&str, CheckStatus)> {
        self.catalog
            .entries()
            .iter()
            .zip(self.statuses.iter())
            .filter(|(entry, _)| entry.is_leaf())
            .map(|(entry, status)| (entry.id.as_str(), *status))
    }

    fn force_roots(&mut self, status: CheckStatus) {
        let roots = self.catalog.root_indices().to_vec();
        for idx in roots {
            self.force_subtree(idx, status);
        }
    }

    fn force_subtree(&mut self, idx: usize, status: CheckStatus) {
        let end = self.catalog.entry(idx).subtree_end;
        self.statuses[idx..end].fill(status);
    }

    // Single bottom-up pass: each ancestor is recomputed exactly once, and the
    // walk always reaches the root even when an intermediate level is unchanged.
    fn recompute_ancestors(&mut self, idx: usize) {
        let mut current = self.catalog.entry(idx).parent;
        while let Some(parent) = current {
            self.statuses[parent] = self.derived_status(parent);
            current = self.catalog.entry(parent).parent;
        }
    }

    // Children always have larger pre-order indices than their parent, so a
    // reverse sweep settles every child before the group that contains it.
    fn recompute_groups(&mut self) {
        for idx in (0..self.statuses.len()).rev() {
            if !self.catalog.entry(idx).is_leaf() {
                self.statuses[idx] = self.derived_status(idx);
            }
        }
    }

    fn derived_status(&self, idx: usize) -> CheckStatus {
        CheckStatus::from_children(
            self.catalog
                .entry(idx)
                .children
                .iter()
                .map(|&child| self.statuses[child]),
        )
    }
}

/// Borrowed handle on one node of a [`PermissionTree`].
#[derive(Clone, Copy)]
pub struct TreeNodeRef<'a> {
    tree: &'a PermissionTree,
    index: usize,
}

impl<'a> TreeNodeRef<'a> {
    pub fn id(&self) -> &'a str {
        &self.tree.catalog.entry(self.index).id
    }

    pub fn label(&self) -> &'a str {
        &self.tree.catalog.entry(self.index).label
    }

    pub fn status(&self) -> CheckStatus {
        self.tree.statuses[self.index]
    }

    pub fn is_leaf(&self) -> bool {
        self.tree.catalog.entry(self.index).is_leaf()
    }

    pub fn depth(&self) -> usize {
        self.tree.catalog.entry(self.index).depth
    }

    pub fn parent(&self) -> Option<TreeNodeRef<'a>> {
        let tree = self.tree;
        tree.catalog
            .entry(self.index)
            .parent
            .map(|index| TreeNodeRef { tree, index })
    }

    pub fn children(&self) -> impl Iterator<Item = TreeNodeRef<'a>> + use<'a> {
        let tree = self.tree;
        tree.catalog
            .entry(self.index)
            .children
            .iter()
            .map(move |&index| TreeNodeRef { tree, index })
    }

    pub fn view(&self) -> PermissionTreeNodeView {
        PermissionTreeNodeView {
            id: self.id().to_string(),
            label: self.label().to_string(),
            status: self.status(),
            children: self.children().map(|child| child.view()).collect(),
        }
    }
}

impl std::fmt::Debug for TreeNodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeNodeRef")
            .field("id", &self.id())
            .field("status", &self.status())
            .finish()
    }
}

/// Serializable snapshot of one tree node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionTreeNodeView {
    pub id: String,
    pub label: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<PermissionTreeNodeView>,
}
