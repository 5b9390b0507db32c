//! Role form editing sessions.
//!
//! A session is the server-side counterpart of an open create/edit role
//! form. It exclusively owns one [`PermissionTree`], rebuilt from scratch
//! when the form opens or is reset and discarded when the form closes.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use keystone_config::RoleFormConfig;
use keystone_core::catalog::PermissionCatalog;
use keystone_core::errors::{AppError, TreeError};
use keystone_core::projection::{build_tree, extract_granted};
use keystone_core::tree::{CheckStatus, PermissionTree};
use keystone_models::{FormSessionId, Role, RoleFormView, RoleId};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RoleFormSession {
    /// The role being edited, as it was when the form opened.
    original: Option<Role>,
    tree: PermissionTree,
}

impl RoleFormSession {
    pub fn open_new(catalog: Arc<PermissionCatalog>) -> Self {
        Self {
            original: None,
            tree: build_tree(catalog, std::iter::empty::<&str>()),
        }
    }

    pub fn open_edit(catalog: Arc<PermissionCatalog>, role: Role) -> Self {
        let tree = build_tree(catalog, &role.permissions);
        Self {
            original: Some(role),
            tree,
        }
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.original.as_ref().map(|role| role.id)
    }

    pub fn tree(&self) -> &PermissionTree {
        &self.tree
    }

    pub fn toggle(&mut self, node_id: &str) -> Result<CheckStatus, TreeError> {
        self.tree.toggle(node_id)
    }

    pub fn select_all(&mut self) {
        self.tree.select_all();
    }

    pub fn clear_all(&mut self) {
        self.tree.clear_all();
    }

    /// Discards every toggle since the form opened.
    pub fn reset(&mut self) {
        let catalog = Arc::clone(self.tree.catalog());
        self.tree = match &self.original {
            Some(role) => build_tree(catalog, &role.permissions),
            None => build_tree(catalog, std::iter::empty::<&str>()),
        };
    }

    pub fn granted(&self) -> BTreeSet<String> {
        extract_granted(&self.tree)
    }

    pub fn view(&self, session_id: FormSessionId) -> RoleFormView {
        let granted: Vec<String> = self.granted().into_iter().collect();
        RoleFormView {
            session_id,
            role_id: self.role_id(),
            role_code: self.original.as_ref().map(|r| r.role_code.clone()),
            role_name: self.original.as_ref().map(|r| r.role_name.clone()),
            tree: self.tree.view(),
            selected_count: granted.len(),
            granted,
            stale_grants: self.tree.stale_grants().to_vec(),
        }
    }
}

#[derive(Debug)]
struct StoredSession {
    session: RoleFormSession,
    last_touched: Instant,
}

/// Open role forms, keyed by session id.
///
/// A form left untouched for longer than the store's TTL is evicted on the
/// next store access, so abandoned forms do not pile up.
#[derive(Debug)]
pub struct FormSessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<FormSessionId, StoredSession>>,
}

impl Default for FormSessionStore {
    fn default() -> Self {
        Self::with_ttl(RoleFormConfig::default().session_ttl)
    }
}

fn session_not_found() -> AppError {
    AppError::not_found(anyhow!("Role form session not found"))
}

fn evict_expired(sessions: &mut HashMap<FormSessionId, StoredSession>, ttl: Duration) {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, stored| now.duration_since(stored.last_touched) < ttl);

    let evicted = before - sessions.len();
    if evicted > 0 {
        info!(evicted, remaining = sessions.len(), "Evicted idle role forms");
    }
}

impl FormSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn insert(&self, session: RoleFormSession) -> FormSessionId {
        let id = FormSessionId::new();
        let mut sessions = self.sessions.write().await;
        evict_expired(&mut sessions, self.ttl);
        sessions.insert(
            id,
            StoredSession {
                session,
                last_touched: Instant::now(),
            },
        );
        id
    }

    /// Runs a synchronous mutation against one session under the store lock
    /// and marks the session as used.
    pub async fn with_session<R>(
        &self,
        id: FormSessionId,
        f: impl FnOnce(&mut RoleFormSession) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        evict_expired(&mut sessions, self.ttl);
        let stored = sessions.get_mut(&id).ok_or_else(session_not_found)?;
        stored.last_touched = Instant::now();
        Ok(f(&mut stored.session))
    }

    pub async fn remove(&self, id: FormSessionId) -> Result<RoleFormSession, AppError> {
        let mut sessions = self.sessions.write().await;
        evict_expired(&mut sessions, self.ttl);
        sessions
            .remove(&id)
            .map(|stored| stored.session)
            .ok_or_else(session_not_found)
    }

    /// Number of open forms, expired ones included until the next eviction.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
