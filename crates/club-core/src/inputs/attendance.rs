use serde::Serialize;

use crate::value_objects::{EventId, ProfileId};

#[derive(Debug, Clone)]
pub struct NewEventAttendance {
    pub event_id: EventId,
    pub profile_id: ProfileId,
    pub checked_in: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EventAttendancePatch {
    pub checked_in: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct EventAttendanceFilter {
    pub event_id: Option<EventId>,
    pub profile_id: Option<ProfileId>,
    pub checked_in: Option<bool>,
}

impl EventAttendanceFilter {
    pub fn for_event(event_id: EventId) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttendanceOrderBy {
    #[default]
    CreatedAt,
    Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub registered: i64,
    pub checked_in: i64,
}
