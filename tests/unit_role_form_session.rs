use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::StatusCode;
use keystone::modules::role_forms::service;
use keystone::modules::role_forms::session::FormSessionStore;
use keystone::modules::roles::repository::{InMemoryRoleRepository, RoleRepository};
use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::AppError;
use keystone_core::permissions::{self, console_catalog};
use keystone_models::{
    FormSessionId, OpenRoleFormDto, Role, RoleId, RoleInput, SubmitRoleFormDto,
};

/// Delegates to an in-memory repository, failing every write while `down` is set.
struct FlakyRoleRepository {
    inner: InMemoryRoleRepository,
    down: AtomicBool,
}

impl FlakyRoleRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryRoleRepository::new(),
            down: AtomicBool::new(true),
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.down.load(Ordering::SeqCst) {
            Err(AppError::internal(anyhow!("role store unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RoleRepository for FlakyRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, AppError> {
        self.inner.list().await
    }

    async fn get(&self, id: RoleId) -> Result<Role, AppError> {
        self.inner.get(id).await
    }

    async fn create(&self, input: RoleInput) -> Result<Role, AppError> {
        self.check()?;
        self.inner.create(input).await
    }

    async fn update(&self, id: RoleId, input: RoleInput) -> Result<Role, AppError> {
        self.check()?;
        self.inner.update(id, input).await
    }

    async fn delete(&self, id: RoleId) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

fn catalog() -> Arc<PermissionCatalog> {
    Arc::new(console_catalog())
}

fn submit_dto() -> SubmitRoleFormDto {
    SubmitRoleFormDto {
        role_code: "Dept Editor".to_string(),
        role_name: "Department editor".to_string(),
    }
}

#[tokio::test]
async fn test_failed_submit_keeps_session_and_tree() {
    let catalog = catalog();
    let store = FormSessionStore::new();
    let repo = FlakyRoleRepository::new();

    let view = service::open_role_form(&store, &repo, &catalog, OpenRoleFormDto::default())
        .await
        .unwrap();
    let id = view.session_id;

    service::toggle_node(&store, id, permissions::DEPARTMENT)
        .await
        .unwrap();
    service::toggle_node(&store, id, permissions::DEPARTMENT_DELETE)
        .await
        .unwrap();
    let before = service::get_role_form(&store, id).await.unwrap();

    let err = service::submit_role_form(&store, &repo, &catalog, id, submit_dto())
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

    let after = service::get_role_form(&store, id).await.unwrap();
    assert_eq!(after.tree, before.tree);
    assert_eq!(after.granted, before.granted);
    assert_eq!(
        after.granted,
        vec![
            permissions::DEPARTMENT_CREATE,
            permissions::DEPARTMENT_EDIT,
            permissions::DEPARTMENT_READ,
        ]
    );

    // Retry once the store is back.
    repo.down.store(false, Ordering::SeqCst);
    let role = service::submit_role_form(&store, &repo, &catalog, id, submit_dto())
        .await
        .unwrap();

    assert_eq!(role.role_code, "Dept Editor");
    assert_eq!(role.permissions, before.granted);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_edit_form_round_trip() {
    let catalog = catalog();
    let store = FormSessionStore::new();
    let repo = InMemoryRoleRepository::new();

    let existing = repo
        .create(RoleInput {
            role_code: "auditor".to_string(),
            role_name: "Auditor".to_string(),
            permissions: vec![permissions::SETTING_AUDIT_READ.to_string()],
        })
        .await
        .unwrap();

    let view = service::open_role_form(
        &store,
        &repo,
        &catalog,
        OpenRoleFormDto {
            role_id: Some(existing.id),
        },
    )
    .await
    .unwrap();
    assert_eq!(view.role_id, Some(existing.id));
    assert_eq!(view.granted, vec![permissions::SETTING_AUDIT_READ]);

    // Submitting without edits writes back the same grants.
    let role = service::submit_role_form(
        &store,
        &repo,
        &catalog,
        view.session_id,
        SubmitRoleFormDto {
            role_code: "auditor".to_string(),
            role_name: "Auditor".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(role.id, existing.id);
    assert_eq!(role.permissions, existing.permissions);
}

#[tokio::test]
async fn test_reset_and_bulk_operations() {
    let catalog = catalog();
    let store = FormSessionStore::new();
    let repo = InMemoryRoleRepository::new();

    let id = service::open_role_form(&store, &repo, &catalog, OpenRoleFormDto::default())
        .await
        .unwrap()
        .session_id;

    let view = service::select_all(&store, id).await.unwrap();
    assert_eq!(view.selected_count, catalog.leaf_ids().count());

    let view = service::clear_all(&store, id).await.unwrap();
    assert!(view.granted.is_empty());

    service::toggle_node(&store, id, permissions::USER_READ)
        .await
        .unwrap();
    let view = service::reset_role_form(&store, id).await.unwrap();
    assert_eq!(view.selected_count, 0);
}

#[tokio::test]
async fn test_toggle_unknown_node_is_not_found() {
    let catalog = catalog();
    let store = FormSessionStore::new();
    let repo = InMemoryRoleRepository::new();

    let id = service::open_role_form(&store, &repo, &catalog, OpenRoleFormDto::default())
        .await
        .unwrap()
        .session_id;

    let err = service::toggle_node(&store, id, "department.archive")
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    service::close_role_form(&store, id).await.unwrap();
    let err = service::get_role_form(&store, id).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

/// Closes the form from another "request" while the role is being written.
struct ClosingRoleRepository {
    inner: InMemoryRoleRepository,
    store: Arc<FormSessionStore>,
    session: OnceLock<FormSessionId>,
}

#[async_trait]
impl RoleRepository for ClosingRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, AppError> {
        self.inner.list().await
    }

    async fn get(&self, id: RoleId) -> Result<Role, AppError> {
        self.inner.get(id).await
    }

    async fn create(&self, input: RoleInput) -> Result<Role, AppError> {
        if let Some(id) = self.session.get() {
            self.store.remove(*id).await?;
        }
        self.inner.create(input).await
    }

    async fn update(&self, id: RoleId, input: RoleInput) -> Result<Role, AppError> {
        self.inner.update(id, input).await
    }

    async fn delete(&self, id: RoleId) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_submit_succeeds_when_form_closed_during_write() {
    let catalog = catalog();
    let store = Arc::new(FormSessionStore::new());
    let repo = ClosingRoleRepository {
        inner: InMemoryRoleRepository::new(),
        store: Arc::clone(&store),
        session: OnceLock::new(),
    };

    let id = service::open_role_form(&store, &repo, &catalog, OpenRoleFormDto::default())
        .await
        .unwrap()
        .session_id;
    repo.session.set(id).unwrap();
    service::toggle_node(&store, id, permissions::ROLE_READ)
        .await
        .unwrap();

    let role = service::submit_role_form(&store, &repo, &catalog, id, submit_dto())
        .await
        .unwrap();

    assert_eq!(role.permissions, vec![permissions::ROLE_READ]);
    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert!(store.is_empty().await);
}
