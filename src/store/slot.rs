//! Persistent slot backends
//!
//! A slot is one named key holding one serialized blob, the shape of a
//! browser localStorage entry. Backends enforce an optional byte quota: a
//! write that would exceed it fails without touching the previous payload.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::StoreError;

/// Narrow seam over the persistent key-value slot the store flushes into.
#[async_trait]
pub trait StorageSlot: Send + Sync {
    /// Read the current payload; `None` when the slot has never been written.
    async fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the payload atomically from the caller's perspective.
    async fn write(&self, payload: &str) -> Result<(), StoreError>;
}

fn check_quota(payload: &str, quota_bytes: Option<usize>) -> Result<(), StoreError> {
    if let Some(quota) = quota_bytes {
        let needed = payload.len();
        if needed > quota {
            return Err(StoreError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// Slot backed by a single file under a base directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(path: P, quota_bytes: Option<usize>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            quota_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorageSlot for FileSlot {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::SlotRead(e)),
        }
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        check_quota(payload, self.quota_bytes)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::SlotWrite)?;
        }

        // Write-then-rename so a failed write never truncates the slot
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, payload)
            .await
            .map_err(StoreError::SlotWrite)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::SlotWrite)?;

        debug!(path = %self.path.display(), bytes = payload.len(), "slot written");
        Ok(())
    }
}

/// In-memory slot for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySlot {
    cell: Mutex<Option<String>>,
    quota_bytes: Option<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            cell: Mutex::new(None),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Pre-load a payload, as if a previous session had written it.
    pub fn preloaded<S: Into<String>>(payload: S) -> Self {
        Self {
            cell: Mutex::new(Some(payload.into())),
            quota_bytes: None,
        }
    }
}

#[async_trait]
impl StorageSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.cell.lock().expect("slot mutex poisoned").clone())
    }

    async fn write(&self, payload: &str) -> Result<(), StoreError> {
        check_quota(payload, self.quota_bytes)?;
        *self.cell.lock().expect("slot mutex poisoned") = Some(payload.to_string());
        Ok(())
    }
}
