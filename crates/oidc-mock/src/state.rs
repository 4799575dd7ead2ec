//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::store::CredentialStore;

/// State shared by all request handlers: the immutable configuration and the
/// one process-wide credential store. Cloned per handler; clones share the
/// store's tables.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: CredentialStore,
}

impl AppState {
    pub fn new(config: Config, store: CredentialStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
