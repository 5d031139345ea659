//! Pipeline entry points for the bulletin monitor.
//!
//! - `UpdateChecker`: fetch, compare, notify, persist
//! - `run_periodic`: startup check followed by fixed-interval checks

pub mod check;
pub mod message;
pub mod schedule;

pub use check::{Sources, UpdateChecker};
pub use message::format_message;
pub use schedule::{PeriodicJob, run_periodic};
