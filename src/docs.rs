use axum::Json;
use utoipa::OpenApi;

use keystone_core::catalog::PermissionCatalogNode;
use keystone_core::tree::{CheckStatus, PermissionTreeNodeView};
use keystone_models::{
    CreateRoleDto, FormSessionId, MessageResponse, OpenRoleFormDto, Role, RoleFormView, RoleId,
    RoleListResponse, SubmitRoleFormDto, ToggleNodeDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::permissions::controller::get_catalog,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::get_role_by_id,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::roles::controller::get_role_permission_tree,
        crate::modules::role_forms::controller::open_role_form,
        crate::modules::role_forms::controller::get_role_form,
        crate::modules::role_forms::controller::toggle_node,
        crate::modules::role_forms::controller::select_all,
        crate::modules::role_forms::controller::clear_all,
        crate::modules::role_forms::controller::reset_role_form,
        crate::modules::role_forms::controller::submit_role_form,
        crate::modules::role_forms::controller::close_role_form,
    ),
    components(
        schemas(
            PermissionCatalogNode,
            PermissionTreeNodeView,
            CheckStatus,
            Role,
            RoleId,
            RoleListResponse,
            CreateRoleDto,
            MessageResponse,
            FormSessionId,
            OpenRoleFormDto,
            ToggleNodeDto,
            SubmitRoleFormDto,
            RoleFormView,
        )
    ),
    tags(
        (name = "Permissions", description = "Permission catalog"),
        (name = "Roles", description = "Role management"),
        (name = "Role Forms", description = "Create/edit role forms and their permission trees")
    ),
    info(
        title = "Keystone API",
        version = "0.1.0",
        description = "Role and permission administration API"
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
