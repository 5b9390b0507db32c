//! Permission catalog source.
//!
//! - `PERMISSION_CATALOG_PATH`: JSON file holding an array of catalog nodes.
//!   When unset, the console's built-in catalog is used.
//!
//! The file has the same shape as [`PermissionCatalogNode`]:
//!
//! ```json
//! [
//!   { "id": "department", "label": "Departments", "children": [
//!     { "id": "department.read", "label": "Read" },
//!     { "id": "department.edit", "label": "Edit" }
//!   ]}
//! ]
//! ```
//!
//! [`PermissionCatalogNode`]: keystone_core::catalog::PermissionCatalogNode

use std::path::PathBuf;

use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::CatalogError;
use keystone_core::permissions::console_catalog;
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            path: std::env::var("PERMISSION_CATALOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Loads and validates the configured catalog.
    pub fn load(&self) -> Result<PermissionCatalog, CatalogError> {
        let catalog = match &self.path {
            Some(path) => PermissionCatalog::from_json_file(path)?,
            None => console_catalog(),
        };

        info!(
            source = %self.path.as_ref().map_or("built-in".to_string(), |p| p.display().to_string()),
            nodes = catalog.len(),
            leaves = catalog.leaf_ids().count(),
            "Permission catalog loaded"
        );

        Ok(catalog)
    }
}
