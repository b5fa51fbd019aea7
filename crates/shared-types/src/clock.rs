//! Capture-time timestamps.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 / RFC 3339 string with millisecond precision.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
