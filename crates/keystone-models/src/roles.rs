//! Role domain models and DTOs.
//!
//! A role is a named, coded bundle of granted leaf permission ids. The flat
//! `permissions` list is the wire and storage shape; editing happens on a
//! permission tree built from it.

use crate::ids::RoleId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Code of the built-in system administrator role. It can be listed and
/// viewed but never edited or deleted.
pub const SYSTEM_ADMIN_ROLE_CODE: &str = "SYS_ADMIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub role_code: String,
    pub role_name: String,
    /// Granted leaf permission ids, sorted.
    pub permissions: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Role {
    /// Returns `true` for roles that must not be modified through the API.
    pub fn is_protected(&self) -> bool {
        is_protected_role_code(&self.role_code)
    }
}

pub fn is_protected_role_code(code: &str) -> bool {
    code == SYSTEM_ADMIN_ROLE_CODE
}

/// Role values handed to the role repository on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInput {
    pub role_code: String,
    pub role_name: String,
    pub permissions: Vec<String>,
}

// DTOs

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoleDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Role code must be between 1 and 50 characters"
    ))]
    pub role_code: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Role name must be between 1 and 100 characters"
    ))]
    pub role_name: String,
    /// Leaf permission ids to grant. Group ids and ids missing from the catalog are dropped.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Full replacement of a role, mirroring the edit form.
pub type UpdateRoleDto = CreateRoleDto;

/// Role code and name entered in a role form; permissions come from the
/// session's tree.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitRoleFormDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Role code must be between 1 and 50 characters"
    ))]
    pub role_code: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Role name must be between 1 and 100 characters"
    ))]
    pub role_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleListResponse {
    pub data: Vec<Role>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_role_code_is_exact() {
        assert!(is_protected_role_code("SYS_ADMIN"));
        assert!(!is_protected_role_code("sys_admin"));
        assert!(!is_protected_role_code("Sys-Admin"));
    }

    #[test]
    fn test_create_role_dto_validation() {
        let valid = CreateRoleDto {
            role_code: "viewer".to_string(),
            role_name: "Viewer".to_string(),
            permissions: vec![],
        };
        assert!(valid.validate().is_ok());

        let empty_code = CreateRoleDto {
            role_code: "".to_string(),
            ..valid.clone()
        };
        assert!(empty_code.validate().is_err());

        let long_name = CreateRoleDto {
            role_name: "x".repeat(101),
            ..valid
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_create_role_dto_permissions_default() {
        let dto: CreateRoleDto =
            serde_json::from_str(r#"{"role_code": "viewer", "role_name": "Viewer"}"#).unwrap();
        assert!(dto.permissions.is_empty());
    }
}
