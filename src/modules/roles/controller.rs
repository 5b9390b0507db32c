use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use keystone_core::errors::AppError;
use keystone_core::tree::PermissionTreeNodeView;
use keystone_models::{
    CreateRoleDto, MessageResponse, Role, RoleId, RoleListResponse, UpdateRoleDto,
};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "List of roles", body = RoleListResponse)
    ),
    tag = "Roles"
)]
pub async fn get_roles(State(state): State<AppState>) -> Result<Json<RoleListResponse>, AppError> {
    let result = service::get_roles(state.roles.as_ref()).await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created successfully", body = Role),
        (status = 400, description = "Invalid request or duplicate role code"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Roles"
)]
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<Role>), AppError> {
    let role = service::create_role(state.roles.as_ref(), &state.catalog, dto).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    params(
        ("id" = RoleId, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role details", body = Role),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles"
)]
pub async fn get_role_by_id(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<Role>, AppError> {
    let role = service::get_role_by_id(state.roles.as_ref(), id).await?;
    Ok(Json(role))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    params(
        ("id" = RoleId, Path, description = "Role ID")
    ),
    request_body = CreateRoleDto,
    responses(
        (status = 200, description = "Role updated successfully", body = Role),
        (status = 400, description = "Invalid request or duplicate role code"),
        (status = 403, description = "System role cannot be edited"),
        (status = 404, description = "Role not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Roles"
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<Role>, AppError> {
    let role = service::update_role(state.roles.as_ref(), &state.catalog, id, dto).await?;
    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(
        ("id" = RoleId, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role deleted successfully", body = MessageResponse),
        (status = 403, description = "System role cannot be deleted"),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles"
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<MessageResponse>, AppError> {
    service::delete_role(state.roles.as_ref(), id).await?;
    Ok(Json(MessageResponse {
        message: "Role deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}/permission-tree",
    params(
        ("id" = RoleId, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role permissions laid over the catalog", body = Vec<PermissionTreeNodeView>),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles"
)]
pub async fn get_role_permission_tree(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<Vec<PermissionTreeNodeView>>, AppError> {
    let tree = service::get_role_permission_tree(state.roles.as_ref(), &state.catalog, id).await?;
    Ok(Json(tree))
}
