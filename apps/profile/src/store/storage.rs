//! Durable storage backends for the profile aggregate.
//!
//! The whole aggregate is serialized as one JSON document under one fixed
//! location — read once at startup, rewritten after every mutation. The store
//! treats writes as best-effort: the in-memory aggregate stays authoritative.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::ProfileAggregate;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value persistence seam for the aggregate.
/// Carried by the store as `Arc<dyn ProfileStorage>`.
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Returns the persisted aggregate, or `None` if no record exists yet.
    async fn load(&self) -> Result<Option<ProfileAggregate>, StorageError>;

    async fn save(&self, aggregate: &ProfileAggregate) -> Result<(), StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed storage
// ────────────────────────────────────────────────────────────────────────────

/// JSON document on disk. Saves go through a temp file plus rename so an
/// interrupted write never truncates the existing record.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ProfileStorage for FileStorage {
    async fn load(&self) -> Result<Option<ProfileAggregate>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let aggregate = serde_json::from_slice(&bytes)?;
        Ok(Some(aggregate))
    }

    async fn save(&self, aggregate: &ProfileAggregate) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(aggregate)?;
        let temp = self.temp_path();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&temp, &json).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!("profile record written to {}", self.path.display());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory storage
// ────────────────────────────────────────────────────────────────────────────

/// In-process backend for tests and dry runs. Stores the serialized record so
/// load/save exercise the same round trip as the file backend.
#[derive(Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the record, e.g. to simulate a corrupt document.
    pub fn with_record(json: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(json.into())),
        }
    }

}

#[async_trait]
impl ProfileStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<ProfileAggregate>, StorageError> {
        let record = self.record.lock().expect("storage mutex poisoned").clone();
        match record {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, aggregate: &ProfileAggregate) -> Result<(), StorageError> {
        let json = serde_json::to_string(aggregate)?;
        *self.record.lock().expect("storage mutex poisoned") = Some(json);
        Ok(())
    }
}
