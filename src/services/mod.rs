//! Service layer for the bulletin monitor.
//!
//! - Push notifications through Gotify (`GotifyNotifier`)

mod notifier;

pub use notifier::{GotifyNotifier, Notifier, TokenPlacement};
