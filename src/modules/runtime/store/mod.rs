//! Todo persistence
//!
//! The HTTP layer only sees [`TodoStore`]; [`open`] picks the implementation
//! named by the configuration.

mod memory;
mod mongo;
mod traits;

pub use memory::MemoryTodoStore;
pub use mongo::MongoTodoStore;
pub use traits::TodoStore;

use std::sync::Arc;
use todos_core::{StoreConfig, TodoError};
use todos_types::StoreBackend;
use tracing::info;

/// Create the store described by `config`
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn TodoStore>, TodoError> {
    let store: Arc<dyn TodoStore> = match config.backend {
        StoreBackend::Mongodb => Arc::new(MongoTodoStore::new(config).await?),
        StoreBackend::Memory => Arc::new(MemoryTodoStore::new()),
    };
    info!("Opened {} store", store.backend());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open(&StoreConfig::memory()).await.unwrap();
        assert_eq!(store.backend(), StoreBackend::Memory);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_mongodb_without_url() {
        let mut config = StoreConfig::mongodb("unused");
        config.url = None;
        let result = open(&config).await;
        assert!(matches!(result, Err(TodoError::Config(_))));
    }
}
