use std::sync::{Arc, PoisonError, RwLock};

use trellis_core::sidebar::SidebarRegistry;

use crate::config::ServerConfig;
use crate::hooks::PrepareHooks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: trellis_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Sidebar registrations for every installed theme.
    pub sidebars: Arc<RwLock<SidebarRegistry>>,
    /// Transforms applied to every item a handler serializes.
    pub hooks: Arc<PrepareHooks>,
}

impl AppState {
    pub fn new(pool: trellis_db::DbPool, config: ServerConfig, sidebars: SidebarRegistry) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            sidebars: Arc::new(RwLock::new(sidebars)),
            hooks: Arc::new(PrepareHooks::default()),
        }
    }

    pub fn with_hooks(mut self, hooks: PrepareHooks) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Copy of the current registrations.
    ///
    /// Handlers work on a snapshot so no lock is held across an `.await`.
    pub fn sidebar_registry(&self) -> SidebarRegistry {
        self.sidebars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` with write access to the registrations.
    pub fn update_sidebar_registry<R>(&self, f: impl FnOnce(&mut SidebarRegistry) -> R) -> R {
        let mut registry = self.sidebars.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut registry)
    }
}
