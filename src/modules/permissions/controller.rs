use axum::{Json, extract::State};
use keystone_core::catalog::PermissionCatalogNode;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/permissions/catalog",
    responses(
        (status = 200, description = "Every grantable permission, grouped by module", body = Vec<PermissionCatalogNode>)
    ),
    tag = "Permissions"
)]
pub async fn get_catalog(State(state): State<AppState>) -> Json<Vec<PermissionCatalogNode>> {
    Json(state.catalog.nodes().to_vec())
}
