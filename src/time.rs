//! Timestamp math against the wire epoch.
//!
//! Instants are carried as a signed count of milliseconds relative to
//! 2016-01-01T00:00:00Z; sub-millisecond precision is truncated.

use chrono::{DateTime, Utc};

/// Milliseconds from the Unix epoch to the wire epoch, 2016-01-01T00:00:00Z.
const EPOCH_UNIX_MS: i64 = 1_451_606_400_000;

/// Signed milliseconds between `t` and the wire epoch.
pub(crate) fn millis_from_epoch(t: &DateTime<Utc>) -> i64 {
    t.timestamp_millis() - EPOCH_UNIX_MS
}

/// Reconstructs an instant from a signed millisecond offset, if it falls in
/// the representable range.
pub(crate) fn from_epoch_millis(delta: i64) -> Option<DateTime<Utc>> {
    delta
        .checked_add(EPOCH_UNIX_MS)
        .and_then(DateTime::from_timestamp_millis)
}
