//! Role read/write collaborator.
//!
//! The role form only needs to read a role's granted permissions and to
//! create or update a role with a flat permission list. [`RoleRepository`] is
//! that seam; [`InMemoryRoleRepository`] backs it for the standalone server
//! and for tests.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use keystone_core::errors::AppError;
use keystone_models::{Role, RoleId, RoleInput};
use tokio::sync::RwLock;

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Role>, AppError>;

    async fn get(&self, id: RoleId) -> Result<Role, AppError>;

    async fn create(&self, input: RoleInput) -> Result<Role, AppError>;

    async fn update(&self, id: RoleId, input: RoleInput) -> Result<Role, AppError>;

    async fn delete(&self, id: RoleId) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_code(code: &str) -> AppError {
    AppError::bad_request(anyhow!("A role with code '{}' already exists", code))
}

fn role_not_found() -> AppError {
    AppError::not_found(anyhow!("Role not found"))
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn list(&self) -> Result<Vec<Role>, AppError> {
        let roles = self.roles.read().await;
        let mut data: Vec<Role> = roles.values().cloned().collect();
        data.sort_by(|a, b| a.role_name.cmp(&b.role_name).then(a.role_code.cmp(&b.role_code)));
        Ok(data)
    }

    async fn get(&self, id: RoleId) -> Result<Role, AppError> {
        self.roles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(role_not_found)
    }

    async fn create(&self, input: RoleInput) -> Result<Role, AppError> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.role_code == input.role_code) {
            return Err(duplicate_code(&input.role_code));
        }

        let now = Utc::now();
        let role = Role {
            id: RoleId::new(),
            role_code: input.role_code,
            role_name: input.role_name,
            permissions: input.permissions,
            created_at: now,
            updated_at: now,
        };
        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, id: RoleId, input: RoleInput) -> Result<Role, AppError> {
        let mut roles = self.roles.write().await;
        if roles
            .values()
            .any(|r| r.id != id && r.role_code == input.role_code)
        {
            return Err(duplicate_code(&input.role_code));
        }

        let role = roles.get_mut(&id).ok_or_else(role_not_found)?;
        role.role_code = input.role_code;
        role.role_name = input.role_name;
        role.permissions = input.permissions;
        role.updated_at = Utc::now();
        Ok(role.clone())
    }

    async fn delete(&self, id: RoleId) -> Result<(), AppError> {
        self.roles
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(role_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn input(code: &str) -> RoleInput {
        RoleInput {
            role_code: code.to_string(),
            role_name: format!("{} role", code),
            permissions: vec!["department.read".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRoleRepository::new();
        let role = repo.create(input("viewer")).await.unwrap();

        let fetched = repo.get(role.id).await.unwrap();
        assert_eq!(fetched, role);
        assert_eq!(fetched.permissions, vec!["department.read"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let repo = InMemoryRoleRepository::new();
        repo.create(input("viewer")).await.unwrap();

        let err = repo.create(input("viewer")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_keeps_own_code() {
        let repo = InMemoryRoleRepository::new();
        let role = repo.create(input("viewer")).await.unwrap();

        let mut changed = input("viewer");
        changed.permissions.clear();
        let updated = repo.update(role.id, changed).await.unwrap();

        assert!(updated.permissions.is_empty());
        assert_eq!(updated.created_at, role.created_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_code_rejected() {
        let repo = InMemoryRoleRepository::new();
        repo.create(input("viewer")).await.unwrap();
        let editor = repo.create(input("editor")).await.unwrap();

        let err = repo.update(editor.id, input("viewer")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_role_is_not_found() {
        let repo = InMemoryRoleRepository::new();
        let id = RoleId::new();

        assert_eq!(repo.get(id).await.unwrap_err().status, StatusCode::NOT_FOUND);
        assert_eq!(
            repo.update(id, input("x")).await.unwrap_err().status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(repo.delete(id).await.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
