//! In-memory persistence.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{default_document, ConfigStore, StoreError};

/// Keeps the document in memory.  Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    document: RwLock<Option<Value>>,
}

impl InMemoryConfigStore {
    /// An empty store; `load` returns the default document until the first
    /// save.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `document`.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }

    /// What has been saved so far, if anything.
    pub async fn snapshot(&self) -> Option<Value> {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load(&self) -> Result<Value, StoreError> {
        match self.document.read().await.as_ref() {
            Some(document) => Ok(document.clone()),
            None => default_document(),
        }
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
