// src/models/notification.rs

use serde::Serialize;

pub const TITLE: &str = "IERS Bulletin C Update";
pub const PRIORITY: &str = "5";

/// A single push message, posted as form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub priority: String,
}

impl Notification {
    /// Build a bulletin update notification around a formatted body.
    pub fn bulletin_update(message: impl Into<String>) -> Self {
        Self {
            title: TITLE.to_string(),
            message: message.into(),
            priority: PRIORITY.to_string(),
        }
    }
}
