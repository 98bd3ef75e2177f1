//! Shared application state

use std::sync::Arc;

use crate::chat::{ChatRelay, SessionStore};
use crate::store::TodoStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Todo store backend
    pub store: Arc<dyn TodoStore>,
    /// Backend label for the health endpoint
    pub backend: &'static str,
    /// Chat relay, present when an agent URL was configured
    pub relay: Option<Arc<ChatRelay>>,
    /// Chat session registry
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create new app state
    pub fn new(store: Arc<dyn TodoStore>, backend: &'static str, relay: Option<ChatRelay>) -> Self {
        Self {
            store,
            backend,
            relay: relay.map(Arc::new),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
