//! Filesystem-backed result store.
//!
//! Records land as pretty-printed JSON under the results directory, which
//! is created on first write.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::StorageError;
use crate::store::ResultStore;
use crate::triage::types::TriageRecord;

/// Result store writing one JSON file per record.
pub struct FsResultStore {
    root: PathBuf,
}

impl FsResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResultStore for FsResultStore {
    async fn put(&self, name: &str, record: &TriageRecord) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;

        let path = self.root.join(name);
        if fs::try_exists(&path).await? {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json).await?;

        debug!(path = %path.display(), "Persisted triage record");
        Ok(())
    }
}
