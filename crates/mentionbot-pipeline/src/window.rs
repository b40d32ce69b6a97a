//! Trailing time-window filtering.

use chrono::{DateTime, Duration, Utc};

/// A trailing lookback window ending at the moment the run started.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    cutoff: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the `hours_back` hours before `now`.
    #[must_use]
    pub fn trailing(hours_back: u32, now: DateTime<Utc>) -> Self {
        Self {
            cutoff: now - Duration::hours(i64::from(hours_back)),
        }
    }

    /// The earliest timestamp a record may have and still be retained.
    #[must_use]
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// Whether a record with this creation time stays in the run.
    ///
    /// A record whose timestamp could not be read (`None`) is retained, not
    /// dropped; absence of a usable timestamp is treated as unknown, and
    /// unknown passes through.
    #[must_use]
    pub fn retains(&self, created_at: Option<DateTime<Utc>>) -> bool {
        created_at.is_none_or(|t| t >= self.cutoff)
    }
}
