//! Role form editing session DTOs.

use crate::ids::{FormSessionId, RoleId};
use keystone_core::tree::PermissionTreeNodeView;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/role-forms`. The body may be omitted entirely for a
/// blank form.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct OpenRoleFormDto {
    /// Role to edit. Omit to open a blank form for a new role.
    pub role_id: Option<RoleId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ToggleNodeDto {
    #[validate(length(min = 1, message = "node_id must not be empty"))]
    pub node_id: String,
}

/// Current state of a role form, re-read by the client after every mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleFormView {
    pub session_id: FormSessionId,
    /// Set when the form edits an existing role.
    pub role_id: Option<RoleId>,
    pub role_code: Option<String>,
    pub role_name: Option<String>,
    pub tree: Vec<PermissionTreeNodeView>,
    /// Leaf permissions that would be granted if the form were submitted now.
    pub granted: Vec<String>,
    pub selected_count: usize,
    /// Previously granted ids that no longer exist in the catalog.
    pub stale_grants: Vec<String>,
}
