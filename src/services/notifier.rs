// src/services/notifier.rs

//! Gotify push notifications.
//!
//! Messages are posted as form data to `{gotify_url}/message`. The token goes
//! in the `token` query parameter by default, or in the `X-Gotify-Key` header
//! when `token_in_header` is set.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Notification};

const TOKEN_HEADER: &str = "X-Gotify-Key";

/// Destination for change notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Where the application token travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    Query,
    Header,
}

/// Notifier posting to a Gotify server.
pub struct GotifyNotifier {
    client: Client,
    base_url: String,
    token: String,
    placement: TokenPlacement,
}

impl GotifyNotifier {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
            placement: TokenPlacement::Query,
        }
    }

    /// Build a notifier from the gateway settings in `config`.
    pub fn from_config(client: Client, config: &Config) -> Self {
        let placement = if config.token_in_header {
            TokenPlacement::Header
        } else {
            TokenPlacement::Query
        };
        Self::new(client, &config.gotify_url, &config.gotify_token).with_placement(placement)
    }

    pub fn with_placement(mut self, placement: TokenPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// `{base}/message`, plus `?token=` in query mode.
    pub fn message_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/message", self.base_url.trim_end_matches('/')))?;
        if self.placement == TokenPlacement::Query {
            url.query_pairs_mut().append_pair("token", &self.token);
        }
        Ok(url)
    }
}

#[async_trait]
impl Notifier for GotifyNotifier {
    async fn notify(&self, notification: &Notification) -> Result<()> {
        let url = self.message_url()?;

        let mut request = self.client.post(url).form(notification);
        if self.placement == TokenPlacement::Header {
            request = request.header(TOKEN_HEADER, &self.token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::notify(e.without_url()))?;

        let status = response.status();
        if status != StatusCode::OK {
            // Never log the query-mode URL; it carries the token.
            return Err(AppError::unexpected_status(
                format!("{}/message", self.base_url.trim_end_matches('/')),
                status.as_u16(),
            ));
        }

        log::debug!("Gotify accepted notification '{}'", notification.title);
        Ok(())
    }
}
