//! Event attendance database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for event_attendance table
#[derive(Debug, Clone, FromRow)]
pub struct EventAttendanceModel {
    pub id: i64,
    pub event_id: i64,
    pub profile_id: Uuid,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct AttendanceSummaryModel {
    pub registered: i64,
    pub checked_in: i64,
}
