pub mod memory;
pub mod seed;

pub use memory::{Database, Store};

use shared_config::AppConfig;

/// Process-wide state handed to every router. The store is an explicit
/// handle owned here, never an ambient global.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }
}
