//! Utility functions for numeric conversions and wall-clock time.

pub mod safe_cast;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as fractional seconds since the Unix epoch
///
/// A clock set before 1970 yields 0.0.
#[must_use]
pub fn unix_timestamp_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
