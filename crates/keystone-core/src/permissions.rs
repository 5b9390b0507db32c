//! Permission ids of the Keystone console and its built-in catalog.
//!
//! These constants are the leaves of [`console_catalog`], the catalog served
//! when no `PERMISSION_CATALOG_PATH` is configured. Using them instead of
//! string literals keeps the catalog and any code that names a permission in
//! step.
//!
//! # Example
//!
//! ```
//! use keystone_core::permissions;
//!
//! let catalog = permissions::console_catalog();
//! assert!(catalog.is_leaf(permissions::DEPARTMENT_EDIT));
//! assert!(!catalog.is_leaf(permissions::DEPARTMENT));
//! ```

use crate::catalog::{PermissionCatalog, PermissionCatalogNode};

// =============================================================================
// User permissions
// =============================================================================

pub const USER: &str = "user";
pub const USER_READ: &str = "user.read";
pub const USER_CREATE: &str = "user.create";
pub const USER_EDIT: &str = "user.edit";
pub const USER_DELETE: &str = "user.delete";

// =============================================================================
// Role permissions
// =============================================================================

pub const ROLE: &str = "role";
pub const ROLE_READ: &str = "role.read";
pub const ROLE_CREATE: &str = "role.create";
pub const ROLE_EDIT: &str = "role.edit";
pub const ROLE_DELETE: &str = "role.delete";

// =============================================================================
// Department permissions
// =============================================================================

pub const DEPARTMENT: &str = "department";
pub const DEPARTMENT_READ: &str = "department.read";
pub const DEPARTMENT_CREATE: &str = "department.create";
pub const DEPARTMENT_EDIT: &str = "department.edit";
pub const DEPARTMENT_DELETE: &str = "department.delete";

// =============================================================================
// Setting permissions
// =============================================================================

pub const SETTING: &str = "setting";
pub const SETTING_GENERAL: &str = "setting.general";
pub const SETTING_GENERAL_READ: &str = "setting.general.read";
pub const SETTING_GENERAL_EDIT: &str = "setting.general.edit";
pub const SETTING_AUDIT: &str = "setting.audit";
pub const SETTING_AUDIT_READ: &str = "setting.audit.read";
pub const SETTING_AUDIT_EXPORT: &str = "setting.audit.export";

fn crud_group(
    id: &str,
    label: &str,
    read: &str,
    create: &str,
    edit: &str,
    delete: &str,
) -> PermissionCatalogNode {
    PermissionCatalogNode::group(
        id,
        label,
        vec![
            PermissionCatalogNode::leaf(read, "Read"),
            PermissionCatalogNode::leaf(create, "Create"),
            PermissionCatalogNode::leaf(edit, "Edit"),
            PermissionCatalogNode::leaf(delete, "Delete"),
        ],
    )
}

/// The nested catalog of the console's own screens.
pub fn console_catalog_nodes() -> Vec<PermissionCatalogNode> {
    vec![
        crud_group(USER, "Users", USER_READ, USER_CREATE, USER_EDIT, USER_DELETE),
        crud_group(ROLE, "Roles", ROLE_READ, ROLE_CREATE, ROLE_EDIT, ROLE_DELETE),
        crud_group(
            DEPARTMENT,
            "Departments",
            DEPARTMENT_READ,
            DEPARTMENT_CREATE,
            DEPARTMENT_EDIT,
            DEPARTMENT_DELETE,
        ),
        PermissionCatalogNode::group(
            SETTING,
            "Settings",
            vec![
                PermissionCatalogNode::group(
                    SETTING_GENERAL,
                    "General",
                    vec![
                        PermissionCatalogNode::leaf(SETTING_GENERAL_READ, "Read"),
                        PermissionCatalogNode::leaf(SETTING_GENERAL_EDIT, "Edit"),
                    ],
                ),
                PermissionCatalogNode::group(
                    SETTING_AUDIT,
                    "Audit Log",
                    vec![
                        PermissionCatalogNode::leaf(SETTING_AUDIT_READ, "Read"),
                        PermissionCatalogNode::leaf(SETTING_AUDIT_EXPORT, "Export"),
                    ],
                ),
            ],
        ),
    ]
}

/// The built-in console catalog, validated.
///
/// # Panics
///
/// Panics if the constants above ever stop being unique.
#[must_use]
pub fn console_catalog() -> PermissionCatalog {
    PermissionCatalog::new(console_catalog_nodes())
        .expect("built-in permission catalog must have unique, non-empty ids")
}
