//! # Keystone API
//!
//! Backend of an administrative console for managing roles and the
//! permissions they grant, built with Rust and Axum.
//!
//! ## Overview
//!
//! Roles grant a subset of a static permission catalog (modules, sub-modules,
//! and concrete actions such as `department.edit`). Operators pick that subset
//! on a tri-state checkbox tree: checking a group checks everything under it,
//! and a group with some but not all children checked shows as partial. Only
//! the checked leaves are stored on the role.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── keystone-core/    # Catalog, permission tree, projection, errors
//! ├── keystone-models/  # Role and role form DTOs
//! ├── keystone-config/  # Environment configuration
//! └── keystone-cli/     # Terminal permission tree editor
//! src/
//! ├── modules/
//! │   ├── permissions/ # Catalog endpoint
//! │   ├── roles/       # Role CRUD and the role repository
//! │   └── role_forms/  # Create/edit role form sessions
//! ├── docs.rs          # OpenAPI document
//! ├── logging.rs       # Tracing setup and request logging
//! ├── router.rs        # Main application router
//! ├── state.rs         # Shared application state
//! └── validator.rs     # Validated JSON extractor
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! ## Role forms
//!
//! A role form is an editing session that owns one permission tree:
//!
//! ```text
//! POST   /api/role-forms                 open (blank, or {"role_id": ...} to edit)
//! POST   /api/role-forms/{id}/toggle     {"node_id": "department"}
//! POST   /api/role-forms/{id}/select-all
//! POST   /api/role-forms/{id}/clear-all
//! POST   /api/role-forms/{id}/reset
//! POST   /api/role-forms/{id}/submit     {"role_code": ..., "role_name": ...}
//! DELETE /api/role-forms/{id}
//! ```
//!
//! A failed submit leaves the session and its tree untouched for a retry.
//! Forms left idle past `ROLE_FORM_SESSION_TTL_SECS` are discarded. The
//! `SYS_ADMIN` role cannot be opened in a form, updated or deleted.
//!
//! ## Environment Variables
//!
//! ```bash
//! HOST=0.0.0.0
//! PORT=3000
//! ALLOWED_ORIGINS=http://localhost:5173
//! PERMISSION_CATALOG_PATH=./catalog.json
//! ROLE_FORM_SESSION_TTL_SECS=1800
//! LOG_LEVEL=info
//! LOG_FORMAT=json
//! ```

pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use keystone_config;
pub use keystone_core;
pub use keystone_models;
