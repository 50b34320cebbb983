use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{FileStore, KvBackend, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KvBackend>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state from the environment: config from env vars, records
    /// persisted in the configured store file.
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let kv = Arc::new(FileStore::open(&config.store_path)?) as Arc<dyn KvBackend>;
        Ok(Self { kv, config })
    }

    pub fn from_parts(kv: Arc<dyn KvBackend>, config: Arc<AppConfig>) -> Self {
        Self { kv, config }
    }

    /// In-memory state for tests: empty memory store, default config.
    pub fn fake() -> Self {
        Self {
            kv: Arc::new(MemoryStore::new()),
            config: Arc::new(AppConfig::default()),
        }
    }
}
