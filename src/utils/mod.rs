//! Project-specific utilities live here.

use time::OffsetDateTime;
use uuid::Uuid;

/// Fresh opaque record identifier (time-ordered UUID v7).
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current wall-clock time in UTC.
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
