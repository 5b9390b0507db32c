use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use keystone_core::errors::AppError;
use keystone_models::{
    FormSessionId, MessageResponse, OpenRoleFormDto, Role, RoleFormView, SubmitRoleFormDto,
    ToggleNodeDto,
};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

#[utoipa::path(
    post,
    path = "/api/role-forms",
    request_body = OpenRoleFormDto,
    responses(
        (status = 201, description = "Role form opened", body = RoleFormView),
        (status = 400, description = "Malformed request body"),
        (status = 403, description = "System role cannot be edited"),
        (status = 404, description = "Role to edit not found")
    ),
    tag = "Role Forms"
)]
pub async fn open_role_form(
    State(state): State<AppState>,
    dto: Option<ValidatedJson<OpenRoleFormDto>>,
) -> Result<(StatusCode, Json<RoleFormView>), AppError> {
    let dto = dto.map(|ValidatedJson(dto)| dto).unwrap_or_default();
    let view =
        service::open_role_form(&state.role_forms, state.roles.as_ref(), &state.catalog, dto)
            .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/role-forms/{id}",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    responses(
        (status = 200, description = "Current form state", body = RoleFormView),
        (status = 404, description = "Session not found")
    ),
    tag = "Role Forms"
)]
pub async fn get_role_form(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
) -> Result<Json<RoleFormView>, AppError> {
    let view = service::get_role_form(&state.role_forms, id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/role-forms/{id}/toggle",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    request_body = ToggleNodeDto,
    responses(
        (status = 200, description = "Node toggled", body = RoleFormView),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Session or permission node not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Role Forms"
)]
pub async fn toggle_node(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
    ValidatedJson(dto): ValidatedJson<ToggleNodeDto>,
) -> Result<Json<RoleFormView>, AppError> {
    let view = service::toggle_node(&state.role_forms, id, &dto.node_id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/role-forms/{id}/select-all",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    responses(
        (status = 200, description = "Every permission checked", body = RoleFormView),
        (status = 404, description = "Session not found")
    ),
    tag = "Role Forms"
)]
pub async fn select_all(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
) -> Result<Json<RoleFormView>, AppError> {
    let view = service::select_all(&state.role_forms, id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/role-forms/{id}/clear-all",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    responses(
        (status = 200, description = "Every permission unchecked", body = RoleFormView),
        (status = 404, description = "Session not found")
    ),
    tag = "Role Forms"
)]
pub async fn clear_all(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
) -> Result<Json<RoleFormView>, AppError> {
    let view = service::clear_all(&state.role_forms, id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/role-forms/{id}/reset",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    responses(
        (status = 200, description = "Form restored to its opening state", body = RoleFormView),
        (status = 404, description = "Session not found")
    ),
    tag = "Role Forms"
)]
pub async fn reset_role_form(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
) -> Result<Json<RoleFormView>, AppError> {
    let view = service::reset_role_form(&state.role_forms, id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/role-forms/{id}/submit",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    request_body = SubmitRoleFormDto,
    responses(
        (status = 200, description = "Role created or updated", body = Role),
        (status = 400, description = "Invalid request or duplicate role code"),
        (status = 404, description = "Session or role not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Role Forms"
)]
pub async fn submit_role_form(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
    ValidatedJson(dto): ValidatedJson<SubmitRoleFormDto>,
) -> Result<Json<Role>, AppError> {
    let role = service::submit_role_form(
        &state.role_forms,
        state.roles.as_ref(),
        &state.catalog,
        id,
        dto,
    )
    .await?;
    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/api/role-forms/{id}",
    params(
        ("id" = FormSessionId, Path, description = "Role form session ID")
    ),
    responses(
        (status = 200, description = "Role form closed", body = MessageResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "Role Forms"
)]
pub async fn close_role_form(
    State(state): State<AppState>,
    Path(id): Path<FormSessionId>,
) -> Result<Json<MessageResponse>, AppError> {
    service::close_role_form(&state.role_forms, id).await?;
    Ok(Json(MessageResponse {
        message: "Role form closed".to_string(),
    }))
}
