//! # Keystone Models
//!
//! Domain models and DTOs for the Keystone API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed ids
//! - [`roles`]: Role models and role CRUD DTOs
//! - [`role_forms`]: Role form editing session DTOs
//!
//! # Example
//!
//! ```ignore
//! use keystone_models::roles::{SYSTEM_ADMIN_ROLE_CODE, is_protected_role_code};
//!
//! assert!(is_protected_role_code(SYSTEM_ADMIN_ROLE_CODE));
//! ```

pub mod ids;
pub mod role_forms;
pub mod roles;

// Re-export commonly used types at crate root for convenience
pub use ids::{FormSessionId, RoleId};

pub use role_forms::{OpenRoleFormDto, RoleFormView, ToggleNodeDto};

pub use roles::{
    CreateRoleDto, MessageResponse, Role, RoleInput, RoleListResponse, SubmitRoleFormDto,
    SYSTEM_ADMIN_ROLE_CODE, UpdateRoleDto, is_protected_role_code,
};
