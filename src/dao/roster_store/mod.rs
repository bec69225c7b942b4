/// File-backed roster store keeping one payload file per key.
pub mod file;
/// In-memory roster store for tests and ephemeral setups.
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for serialized team rosters.
///
/// Stores deal in opaque string payloads keyed by name; callers own the
/// serialization format.
pub trait RosterStore: Send + Sync {
    /// Fetch the payload stored under `key`, `None` when absent.
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Persist `value` under `key`, replacing any previous payload.
    fn save(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete the payload stored under `key`, if any.
    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>>;
}
