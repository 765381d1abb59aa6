//! EventAttendance entity - a profile's registration and check-in for an event

use chrono::{DateTime, Utc};

use crate::value_objects::{AttendanceId, EventId, ProfileId};

/// EventAttendance entity (unique per event + profile)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttendance {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub profile_id: ProfileId,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}
