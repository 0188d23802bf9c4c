use mongodb::Database;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::storage::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub storage: Arc<StorageService>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig, storage: StorageService) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            storage: Arc::new(storage),
        }
    }
}
