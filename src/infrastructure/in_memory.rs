use crate::domain::ports::SessionStore;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory session persistence bridge.
///
/// Uses `Arc<RwLock<HashMap<String, Value>>>` so clones share one session:
/// each step of the flow holds its own handle to the same storage, the way
/// separate page loads share one browser session.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
