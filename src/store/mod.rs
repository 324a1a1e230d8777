//! Write-once artifact store for finished triage records.

mod fs;

pub use fs::FsResultStore;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::triage::types::TriageRecord;

/// Write-once store keyed by artifact name.
///
/// Names are `<record-id>.json`; ids are freshly generated UUIDs, so a
/// name collision means something is wrong and `put` must refuse to
/// overwrite.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn put(&self, name: &str, record: &TriageRecord) -> Result<(), StorageError>;
}
