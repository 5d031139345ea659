// src/pipeline/check.rs

//! Bulletin change detection.
//!
//! One check fetches the bulletin, compares it byte-for-byte with the stored
//! snapshot and, on a difference, notifies and then persists. The snapshot is
//! written last, so a failed send leaves the old snapshot in place and the
//! same change is picked up again on the next tick.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{Result, ResultExt};
use crate::models::{CheckOutcome, Config, Notification};
use crate::pipeline::message::format_message;
use crate::services::{GotifyNotifier, Notifier};
use crate::storage::{LocalStorage, SnapshotStore};
use crate::utils::{http, short_digest};

/// Remote endpoints a check reads from.
#[derive(Debug, Clone)]
pub struct Sources {
    pub bulletin_url: String,
    pub api_url: String,
}

impl From<&Config> for Sources {
    fn from(config: &Config) -> Self {
        Self {
            bulletin_url: config.bulletin_url.clone(),
            api_url: config.api_url.clone(),
        }
    }
}

/// Orchestrates fetch, compare, notify and persist.
pub struct UpdateChecker {
    client: Client,
    sources: Sources,
    store: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn Notifier>,
}

impl UpdateChecker {
    pub fn new(
        client: Client,
        sources: Sources,
        store: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            sources,
            store,
            notifier,
        }
    }

    /// Wire up the checker with local file storage and Gotify.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::create_client(config)?;
        let store =
            LocalStorage::new(config.snapshot_path()).with_atomic_writes(config.atomic_write);
        let notifier = GotifyNotifier::from_config(client.clone(), config);

        Ok(Self::new(
            client,
            Sources::from(config),
            Arc::new(store),
            Arc::new(notifier),
        ))
    }

    pub fn bulletin_url(&self) -> &str {
        &self.sources.bulletin_url
    }

    /// First check after startup.
    ///
    /// Without a snapshot the current bulletin becomes the baseline and no
    /// notification is sent; otherwise this is a regular [`check`](Self::check).
    pub async fn initial_check(&self) -> Result<CheckOutcome> {
        let exists = self
            .store
            .exists()
            .await
            .context("error checking file")?;
        if exists {
            return self.check().await;
        }

        let content = self.fetch_bulletin().await?;
        self.store
            .write(&content)
            .await
            .context("error saving baseline")?;

        log::info!(
            "Saved baseline bulletin ({} bytes, {}) to {}",
            content.len(),
            short_digest(&content),
            self.store.location()
        );
        Ok(CheckOutcome::Baseline {
            bytes: content.len(),
        })
    }

    /// Compare the remote bulletin with the snapshot and announce any change.
    pub async fn check(&self) -> Result<CheckOutcome> {
        let remote = self.fetch_bulletin().await?;
        let stored = self
            .store
            .read()
            .await
            .context("error reading existing file")?;

        if remote == stored {
            log::debug!("Bulletin unchanged ({})", short_digest(&remote));
            return Ok(CheckOutcome::Unchanged);
        }

        log::info!(
            "Bulletin changed ({} -> {})",
            short_digest(&stored),
            short_digest(&remote)
        );

        let message = self
            .build_message(&remote)
            .await
            .context("error generating notification message")?;
        self.notifier
            .notify(&Notification::bulletin_update(message))
            .await
            .context("error sending notification")?;
        self.store
            .write(&remote)
            .await
            .context("error updating file")?;

        log::info!("Bulletin updated and notification sent");
        Ok(CheckOutcome::Updated {
            bytes: remote.len(),
        })
    }

    async fn fetch_bulletin(&self) -> Result<Vec<u8>> {
        http::fetch_bytes(&self.client, &self.sources.bulletin_url)
            .await
            .context("error fetching bulletin")
    }

    async fn build_message(&self, new_content: &[u8]) -> Result<String> {
        let api = http::fetch_bytes(&self.client, &self.sources.api_url)
            .await
            .context("error fetching API")?;
        Ok(format_message(new_content, &api))
    }
}
