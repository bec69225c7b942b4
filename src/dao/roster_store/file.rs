use std::{io::ErrorKind, path::PathBuf};

use futures::future::BoxFuture;
use tokio::fs;

use crate::dao::{
    roster_store::RosterStore,
    storage::{StorageError, StorageResult},
};

/// Roster store writing one payload file per key under a data directory.
///
/// The directory is created lazily on the first save. Keys are mapped to file
/// names by replacing characters that are unsafe in paths.
#[derive(Clone)]
pub struct FileRosterStore {
    dir: PathBuf,
}

impl FileRosterStore {
    /// Create a store rooted at `dir`. The directory does not need to exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(file_name)
    }
}

impl RosterStore for FileRosterStore {
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let path = self.path_for(key);
        let key = key.to_owned();
        Box::pin(async move {
            match fs::read_to_string(&path).await {
                Ok(payload) => Ok(Some(payload)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StorageError::backend(key, err)),
            }
        })
    }

    fn save(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        let key = key.to_owned();
        Box::pin(async move {
            fs::create_dir_all(&dir)
                .await
                .map_err(|err| StorageError::backend(key.clone(), err))?;
            fs::write(&path, value)
                .await
                .map_err(|err| StorageError::backend(key, err))
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path_for(key);
        let key = key.to_owned();
        Box::pin(async move {
            match fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::backend(key, err)),
            }
        })
    }
}
