use std::error::Error;
use thiserror::Error;

/// Result alias for roster store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by roster store backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failed on key `{key}`")]
    Backend {
        key: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct a keyed error from any backend failure.
    pub fn backend(key: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Backend {
            key: key.into(),
            source: Box::new(source),
        }
    }
}
