//! Time and timestamp helpers.

use chrono::{DateTime, Duration, Utc};

/// UTC timestamp used for `created_at`, `finished_at`, and refresh times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Remaining time until `finished_at`, measured from `at`.
///
/// Goes negative once the countdown has elapsed; callers decide how to
/// render expired products.
#[must_use]
pub fn rest_time(finished_at: Timestamp, at: Timestamp) -> Duration {
    finished_at - at
}
