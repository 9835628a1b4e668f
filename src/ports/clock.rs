//! Clock port used to stamp generated artifacts.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Replay sessions substitute a recorded clock so `generatedAt` values are
/// stable across runs.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
