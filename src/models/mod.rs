// src/models/mod.rs

//! Domain models for the bulletin monitor.

mod config;
mod notification;

pub use config::{Config, defaults};
pub use notification::Notification;

/// What a check cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No snapshot existed; the fetched bulletin became the baseline.
    Baseline { bytes: usize },
    /// Remote content matches the stored snapshot.
    Unchanged,
    /// Remote content changed, was announced, and replaced the snapshot.
    Updated { bytes: usize },
}
