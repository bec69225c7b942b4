use std::{collections::HashMap, sync::Arc};

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::dao::{roster_store::RosterStore, storage::StorageResult};

/// Roster store keeping payloads in process memory.
///
/// Nothing survives a restart; embedding hosts use it when no durable storage
/// is wanted, and tests use it to observe what would have been persisted.
#[derive(Clone, Default)]
pub struct MemoryRosterStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryRosterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the payload currently held under `key`.
    pub async fn payload(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

impl RosterStore for MemoryRosterStore {
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_owned();
        Box::pin(async move { Ok(entries.lock().await.get(&key).cloned()) })
    }

    fn save(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_owned();
        Box::pin(async move {
            entries.lock().await.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let entries = Arc::clone(&self.entries);
        let key = key.to_owned();
        Box::pin(async move {
            entries.lock().await.remove(&key);
            Ok(())
        })
    }
}
