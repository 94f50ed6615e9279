//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed configuration and the session store. Per-visitor state
//! lives inside the store, never in ambient globals.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let sessions = SessionStore::new(config.session_idle_ttl);
        Self { config: Arc::new(config), sessions }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
