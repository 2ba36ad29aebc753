use std::sync::Arc;
use forum_persist::PersistenceClient;
use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Nothing here is mutated per request; the persistence client is the only
/// shared resource and it manages its own pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: Arc<dyn PersistenceClient>,
}

impl AppState {
    pub fn new(config: Config, persist: Arc<dyn PersistenceClient>) -> Self {
        Self {
            config: Arc::new(config),
            persist,
        }
    }
}
