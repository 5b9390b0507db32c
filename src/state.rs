use std::sync::Arc;

use keystone_config::{CatalogConfig, CorsConfig, RoleFormConfig};
use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::CatalogError;

use crate::modules::role_forms::session::FormSessionStore;
use crate::modules::roles::repository::{InMemoryRoleRepository, RoleRepository};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PermissionCatalog>,
    pub roles: Arc<dyn RoleRepository>,
    pub role_forms: Arc<FormSessionStore>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        catalog: PermissionCatalog,
        roles: Arc<dyn RoleRepository>,
        cors_config: CorsConfig,
        role_form_config: RoleFormConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            roles,
            role_forms: Arc::new(FormSessionStore::with_ttl(role_form_config.session_ttl)),
            cors_config,
        }
    }
}

pub fn init_app_state() -> Result<AppState, CatalogError> {
    let catalog = CatalogConfig::from_env().load()?;
    Ok(AppState::new(
        catalog,
        Arc::new(InMemoryRoleRepository::new()),
        CorsConfig::from_env(),
        RoleFormConfig::from_env(),
    ))
}
