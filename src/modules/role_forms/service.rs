use std::sync::Arc;

use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::AppError;
use keystone_models::{FormSessionId, OpenRoleFormDto, Role, RoleFormView, SubmitRoleFormDto};
use tracing::{debug, info, instrument, warn};

use super::session::{FormSessionStore, RoleFormSession};
use crate::modules::roles::repository::RoleRepository;
use crate::modules::roles::service::{ensure_not_protected, role_input};

#[instrument(skip(store, repo, catalog))]
pub async fn open_role_form(
    store: &FormSessionStore,
    repo: &dyn RoleRepository,
    catalog: &Arc<PermissionCatalog>,
    dto: OpenRoleFormDto,
) -> Result<RoleFormView, AppError> {
    let session = match dto.role_id {
        Some(role_id) => {
            let role = repo.get(role_id).await?;
            ensure_not_protected(&role)?;
            RoleFormSession::open_edit(Arc::clone(catalog), role)
        }
        None => RoleFormSession::open_new(Arc::clone(catalog)),
    };

    let view_session = session.clone();
    let session_id = store.insert(session).await;
    info!(session_id = %session_id, role_id = ?dto.role_id, "Role form opened");
    Ok(view_session.view(session_id))
}

#[instrument(skip(store))]
pub async fn get_role_form(
    store: &FormSessionStore,
    id: FormSessionId,
) -> Result<RoleFormView, AppError> {
    store.with_session(id, |session| session.view(id)).await
}

#[instrument(skip(store))]
pub async fn toggle_node(
    store: &FormSessionStore,
    id: FormSessionId,
    node_id: &str,
) -> Result<RoleFormView, AppError> {
    store
        .with_session(id, |session| {
            session
                .toggle(node_id)
                .map(|_| session.view(id))
                .map_err(AppError::from_tree)
        })
        .await?
}

#[instrument(skip(store))]
pub async fn select_all(
    store: &FormSessionStore,
    id: FormSessionId,
) -> Result<RoleFormView, AppError> {
    store
        .with_session(id, |session| {
            session.select_all();
            session.view(id)
        })
        .await
}

#[instrument(skip(store))]
pub async fn clear_all(store: &FormSessionStore, id: FormSessionId) -> Result<RoleFormView, AppError> {
    store
        .with_session(id, |session| {
            session.clear_all();
            session.view(id)
        })
        .await
}

#[instrument(skip(store))]
pub async fn reset_role_form(
    store: &FormSessionStore,
    id: FormSessionId,
) -> Result<RoleFormView, AppError> {
    store
        .with_session(id, |session| {
            session.reset();
            session.view(id)
        })
        .await
}

/// Sends the form's checked leaves to the role write API.
///
/// The session is closed only when the write succeeds. Any failure leaves
/// the session and its tree exactly as they were so the operator can retry
/// without re-selecting permissions.
#[instrument(skip(store, repo, catalog))]
pub async fn submit_role_form(
    store: &FormSessionStore,
    repo: &dyn RoleRepository,
    catalog: &Arc<PermissionCatalog>,
    id: FormSessionId,
    dto: SubmitRoleFormDto,
) -> Result<Role, AppError> {
    let (role_id, granted) = store
        .with_session(id, |session| {
            (
                session.role_id(),
                session.granted().into_iter().collect::<Vec<_>>(),
            )
        })
        .await?;

    let input = role_input(catalog, &dto.role_code, &dto.role_name, &granted)?;
    let result = match role_id {
        Some(role_id) => repo.update(role_id, input).await,
        None => repo.create(input).await,
    };

    match result {
        Ok(role) => {
            // Already saved; the session may have been closed concurrently.
            if store.remove(id).await.is_err() {
                debug!(session_id = %id, "Role form already closed after submit");
            }
            info!(
                session_id = %id,
                role_id = %role.id,
                granted = role.permissions.len(),
                "Role form submitted"
            );
            Ok(role)
        }
        Err(err) => {
            warn!(
                session_id = %id,
                status = %err.status,
                error = %err.error,
                "Role form submission failed; session kept for retry"
            );
            Err(err)
        }
    }
}

#[instrument(skip(store))]
pub async fn close_role_form(store: &FormSessionStore, id: FormSessionId) -> Result<(), AppError> {
    store.remove(id).await?;
    info!(session_id = %id, "Role form closed");
    Ok(())
}
