//! Storage abstractions for the bulletin snapshot.
//!
//! The snapshot is the last bulletin we announced (or the baseline fetched on
//! first start), kept byte-for-byte as the server sent it. It is re-read on
//! every check; nothing is cached in memory.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Whether a snapshot has been written yet.
    async fn exists(&self) -> Result<bool>;

    /// Read the full snapshot.
    async fn read(&self) -> Result<Vec<u8>>;

    /// Replace the snapshot with `bytes`.
    async fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}
