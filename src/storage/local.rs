//! Local filesystem storage implementation.
//!
//! Writes are a plain overwrite unless atomic writes are enabled, in which
//! case the bytes go to `<file>.tmp` first and are renamed over the snapshot.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::SnapshotStore;

/// Snapshot kept in a single file on local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    atomic: bool,
}

impl LocalStorage {
    /// Create a LocalStorage backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic: false,
        }
    }

    /// Switch to temp-file-and-rename writes.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::storage(parent, e))?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn exists(&self) -> Result<bool> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| AppError::storage(&self.path, e))
    }

    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::storage(&self.path, e))
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let written = if self.atomic {
            self.write_atomic(bytes).await
        } else {
            tokio::fs::write(&self.path, bytes).await
        };
        written.map_err(|e| AppError::storage(&self.path, e))?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("bulletinC.txt"));

        storage.write(b"hello").await.unwrap();
        assert!(storage.exists().await.unwrap());
        assert_eq!(storage.read().await.unwrap(), b"hello".to_vec());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("bulletinC.txt"));

        storage.write(b"a much longer first version").await.unwrap();
        storage.write(b"v2").await.unwrap();
        assert_eq!(storage.read().await.unwrap(), b"v2".to_vec());
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nope.txt"));

        assert!(!storage.exists().await.unwrap());
        let err = storage.read().await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bulletinC.txt");
        let storage = LocalStorage::new(&path).with_atomic_writes(true);

        storage.write(b"v1").await.unwrap();
        storage.write(b"v2").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"v2");
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("state/leap/bulletinC.txt"));

        storage.write(b"v1").await.unwrap();
        assert_eq!(storage.read().await.unwrap(), b"v1".to_vec());
    }
}
