//! Event attendance entity <-> model mapper

use club_core::entities::EventAttendance;
use club_core::inputs::{AttendanceSummary, NewEventAttendance};
use club_core::value_objects::{AttendanceId, EventId, ProfileId};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::InsertRow;
use crate::models::{AttendanceSummaryModel, EventAttendanceModel};

/// Convert EventAttendanceModel to EventAttendance entity
impl From<EventAttendanceModel> for EventAttendance {
    fn from(model: EventAttendanceModel) -> Self {
        EventAttendance {
            id: AttendanceId::new(model.id),
            event_id: EventId::new(model.event_id),
            profile_id: ProfileId::new(model.profile_id),
            checked_in: model.checked_in,
            created_at: model.created_at,
        }
    }
}

impl From<AttendanceSummaryModel> for AttendanceSummary {
    fn from(model: AttendanceSummaryModel) -> Self {
        AttendanceSummary {
            registered: model.registered,
            checked_in: model.checked_in,
        }
    }
}

impl InsertRow for NewEventAttendance {
    const COLUMNS: &'static str = "(event_id, profile_id, checked_in)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.event_id.into_inner())
            .push_bind(self.profile_id.into_inner())
            .push_bind(self.checked_in);
    }
}
