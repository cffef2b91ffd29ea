//! fOS Developer Tools
//!
//! User timing (`performance.mark` / `performance.measure`) for the page host.

mod performance;

pub use performance::{EntryType, PerformanceEntry, PerformanceTimeline};

/// Devtools error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DevtoolsError {
    #[error("No mark named '{0}'")]
    UnknownMark(String),
}
