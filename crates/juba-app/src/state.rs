use std::sync::Arc;

use anyhow::Context;
use juba_config::{Config, StoreBackend};
use juba_core::{DictionaryService, DictionaryStore};
use juba_store::{JsonFileStore, MemoryStore};

pub struct AppState {
    pub config: Config,
    pub service: DictionaryService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = open_store(&config).await?;

        Ok(Self {
            service: DictionaryService::new(store),
            config,
        })
    }

    /// State over an existing store, used by tests
    pub fn with_store(config: Config, store: Arc<dyn DictionaryStore>) -> Self {
        Self {
            service: DictionaryService::new(store),
            config,
        }
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DictionaryStore>> {
    let store: Arc<dyn DictionaryStore> = match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, entries are lost on exit");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Json => {
            let path = &config.store.data_path;
            Arc::new(
                JsonFileStore::open(path)
                    .await
                    .with_context(|| format!("failed to open dictionary at {}", path.display()))?,
            )
        }
    };

    Ok(store)
}
