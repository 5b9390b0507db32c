//! # Keystone Core
//!
//! Permission catalog, selection tree and error types for the Keystone role console.
//!
//! - [`catalog`]: the static, validated hierarchy of grantable permissions
//! - [`tree`]: the tri-state selection tree and its check propagation
//! - [`projection`]: conversion between flat grant lists and selection trees
//! - [`permissions`]: permission ids of the console itself and its built-in catalog
//! - [`errors`]: tree, catalog and HTTP error types
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use keystone_core::catalog::{PermissionCatalog, PermissionCatalogNode};
//! use keystone_core::projection::{build_tree, extract_granted};
//! use keystone_core::tree::CheckStatus;
//!
//! let catalog = Arc::new(
//!     PermissionCatalog::new(vec![PermissionCatalogNode::group(
//!         "department",
//!         "Department",
//!         vec![
//!             PermissionCatalogNode::leaf("department.read", "Read"),
//!             PermissionCatalogNode::leaf("department.edit", "Edit"),
//!         ],
//!     )])
//!     .unwrap(),
//! );
//!
//! let mut tree = build_tree(catalog, ["department.read"]);
//! assert_eq!(tree.status("department"), Some(CheckStatus::Partial));
//!
//! tree.toggle("department").unwrap();
//! assert_eq!(extract_granted(&tree).len(), 2);
//! ```

pub mod catalog;
pub mod errors;
pub mod permissions;
pub mod projection;
pub mod tree;

// Re-export commonly used types at crate root
pub use catalog::{PermissionCatalog, PermissionCatalogNode};
pub use errors::{AppError, CatalogError, TreeError};
pub use projection::{build_tree, extract_granted, granted_count, try_build_tree};
pub use tree::{CheckStatus, PermissionTree, PermissionTreeNodeView, TreeNodeRef};
