use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::anyhow;
use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::AppError;
use keystone_core::projection::{build_tree, extract_granted};
use keystone_core::tree::PermissionTreeNodeView;
use keystone_models::{
    CreateRoleDto, Role, RoleId, RoleInput, RoleListResponse, UpdateRoleDto,
};
use tracing::{info, instrument, warn};

use super::repository::RoleRepository;

/// Reduces a submitted permission list to the leaf grants the catalog knows,
/// deduplicated and sorted.
pub fn filter_granted_permissions(
    catalog: &Arc<PermissionCatalog>,
    permissions: &[String],
) -> Vec<String> {
    let tree = build_tree(Arc::clone(catalog), permissions);
    extract_granted(&tree).into_iter().collect()
}

/// Submitted ids that did not survive [`filter_granted_permissions`],
/// ignoring repeats.
pub fn dropped_permissions(submitted: &[String], kept: &[String]) -> BTreeSet<String> {
    submitted
        .iter()
        .filter(|id| !kept.contains(id))
        .cloned()
        .collect()
}

/// Trims and checks the role code and name of a submitted role. The code is
/// otherwise stored exactly as entered.
pub fn role_input(
    catalog: &Arc<PermissionCatalog>,
    role_code: &str,
    role_name: &str,
    permissions: &[String],
) -> Result<RoleInput, AppError> {
    let role_code = role_code.trim().to_string();
    if role_code.is_empty() {
        return Err(AppError::unprocessable(anyhow!("Role code is required")));
    }

    let role_name = role_name.trim().to_string();
    if role_name.is_empty() {
        return Err(AppError::unprocessable(anyhow!("Role name is required")));
    }

    Ok(RoleInput {
        role_code,
        role_name,
        permissions: filter_granted_permissions(catalog, permissions),
    })
}

/// Rejects changes to the system administrator role.
pub fn ensure_not_protected(role: &Role) -> Result<(), AppError> {
    if role.is_protected() {
        warn!(role_id = %role.id, role_code = %role.role_code, "Refused change to protected role");
        return Err(AppError::forbidden(anyhow!(
            "Role '{}' is a system role and cannot be modified",
            role.role_code
        )));
    }
    Ok(())
}

#[instrument(skip(repo))]
pub async fn get_roles(repo: &dyn RoleRepository) -> Result<RoleListResponse, AppError> {
    let data = repo.list().await?;
    Ok(RoleListResponse {
        total: data.len(),
        data,
    })
}

#[instrument(skip(repo))]
pub async fn get_role_by_id(repo: &dyn RoleRepository, id: RoleId) -> Result<Role, AppError> {
    repo.get(id).await
}

#[instrument(skip(repo, catalog))]
pub async fn create_role(
    repo: &dyn RoleRepository,
    catalog: &Arc<PermissionCatalog>,
    dto: CreateRoleDto,
) -> Result<Role, AppError> {
    let input = role_input(catalog, &dto.role_code, &dto.role_name, &dto.permissions)?;
    let dropped = dropped_permissions(&dto.permissions, &input.permissions);
    if !dropped.is_empty() {
        warn!(ids = ?dropped, "Dropped permissions that are not catalog leaves");
    }

    let role = repo.create(input).await?;
    info!(
        role_id = %role.id,
        role_code = %role.role_code,
        granted = role.permissions.len(),
        "Role created"
    );
    Ok(role)
}

#[instrument(skip(repo, catalog))]
pub async fn update_role(
    repo: &dyn RoleRepository,
    catalog: &Arc<PermissionCatalog>,
    id: RoleId,
    dto: UpdateRoleDto,
) -> Result<Role, AppError> {
    ensure_not_protected(&repo.get(id).await?)?;

    let input = role_input(catalog, &dto.role_code, &dto.role_name, &dto.permissions)?;
    let role = repo.update(id, input).await?;
    info!(role_id = %role.id, granted = role.permissions.len(), "Role updated");
    Ok(role)
}

#[instrument(skip(repo))]
pub async fn delete_role(repo: &dyn RoleRepository, id: RoleId) -> Result<(), AppError> {
    ensure_not_protected(&repo.get(id).await?)?;

    repo.delete(id).await?;
    info!(role_id = %id, "Role deleted");
    Ok(())
}

/// The role's grants laid over the catalog, for read-only detail screens.
#[instrument(skip(repo, catalog))]
pub async fn get_role_permission_tree(
    repo: &dyn RoleRepository,
    catalog: &Arc<PermissionCatalog>,
    id: RoleId,
) -> Result<Vec<PermissionTreeNodeView>, AppError> {
    let role = repo.get(id).await?;
    Ok(build_tree(Arc::clone(catalog), &role.permissions).view())
}
