//! Conversion between flat grant lists and selection trees.
//!
//! Roles are stored and transmitted as a flat list of granted leaf ids. The
//! editing form works on a fully populated tri-state tree. [`build_tree`]
//! hydrates the latter from the former; [`extract_granted`] reduces a tree
//! back to the leaf ids that ended up checked.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::PermissionCatalog;
use crate::errors::TreeError;
use crate::tree::{CheckStatus, PermissionTree};

/// Hydrates a tree from previously granted permission ids.
///
/// Leaves named in `granted` start checked; groups are derived bottom-up and
/// never read from `granted`. Ids the catalog does not know as a leaf,
/// including ids naming a group, are stale grants: they are logged at warn
/// level, left out of the tree, and reported by
/// [`PermissionTree::stale_grants`].
///
/// Pass an empty iterator when creating a new role.
pub fn build_tree<I, S>(catalog: Arc<PermissionCatalog>, granted: I) -> PermissionTree
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut statuses = vec![CheckStatus::Unchecked; catalog.len()];
    let mut stale = BTreeSet::new();

    for id in granted {
        let id = id.as_ref();
        match catalog.index_of(id) {
            Some(idx) if catalog.entry(idx).is_leaf() => statuses[idx] = CheckStatus::Checked,
            _ => {
                stale.insert(id.to_string());
            }
        }
    }

    let stale: Vec<String> = stale.into_iter().collect();
    if !stale.is_empty() {
        warn!(
            count = stale.len(),
            ids = ?stale,
            "ignoring granted permissions that are not leaves of the catalog"
        );
    }

    PermissionTree::from_leaf_statuses(catalog, statuses, stale)
}

/// Strict variant of [`build_tree`] that rejects stale grants.
///
/// # Errors
///
/// [`TreeError::Validation`] listing every granted id that is not a leaf of
/// the catalog.
pub fn try_build_tree<I, S>(
    catalog: Arc<PermissionCatalog>,
    granted: I,
) -> Result<PermissionTree, TreeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tree = build_tree(catalog, granted);
    if tree.stale_grants().is_empty() {
        Ok(tree)
    } else {
        Err(TreeError::Validation {
            unknown: tree.stale_grants().to_vec(),
        })
    }
}

/// Leaf ids whose status is checked.
///
/// Groups never appear in the result, whatever their status: only leaves are
/// enforceable grants. A tree with nothing checked yields an empty set.
pub fn extract_granted(tree: &PermissionTree) -> BTreeSet<String> {
    tree.leaf_statuses()
        .filter(|(_, status)| status.is_checked())
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Number of checked leaves, for live "N selected" counters.
pub fn granted_count(tree: &PermissionTree) -> usize {
    tree.leaf_statuses()
        .filter(|(_, status)| status.is_checked())
        .count()
}
