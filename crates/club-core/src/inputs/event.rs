use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::EventWindow;
use crate::query::Nullable;
use crate::value_objects::{EventId, ImageId};

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub registration_required: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub buffered_start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub buffered_end_time: DateTime<Utc>,
    pub payment_required: bool,
    pub image_id: Option<ImageId>,
}

impl NewEvent {
    pub fn window(&self) -> EventWindow {
        EventWindow {
            buffered_start_time: self.buffered_start_time,
            start_time: self.start_time,
            end_time: self.end_time,
            buffered_end_time: self.buffered_end_time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub registration_required: Option<bool>,
    pub description: Nullable<String>,
    pub location: Nullable<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub buffered_start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub buffered_end_time: Option<DateTime<Utc>>,
    pub payment_required: Option<bool>,
    pub image_id: Nullable<ImageId>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.registration_required.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.start_time.is_none()
            && self.buffered_start_time.is_none()
            && self.end_time.is_none()
            && self.buffered_end_time.is_none()
            && self.payment_required.is_none()
            && self.image_id.is_none()
    }

    /// The window after applying this patch over `current`
    pub fn merged_window(&self, current: EventWindow) -> EventWindow {
        EventWindow {
            buffered_start_time: self.buffered_start_time.unwrap_or(current.buffered_start_time),
            start_time: self.start_time.unwrap_or(current.start_time),
            end_time: self.end_time.unwrap_or(current.end_time),
            buffered_end_time: self.buffered_end_time.unwrap_or(current.buffered_end_time),
        }
    }
}

impl From<&NewEvent> for EventPatch {
    fn from(e: &NewEvent) -> Self {
        Self {
            name: Some(e.name.clone()),
            registration_required: Some(e.registration_required),
            description: Some(e.description.clone()),
            location: Some(e.location.clone()),
            start_time: Some(e.start_time),
            buffered_start_time: Some(e.buffered_start_time),
            end_time: Some(e.end_time),
            buffered_end_time: Some(e.buffered_end_time),
            payment_required: Some(e.payment_required),
            image_id: Some(e.image_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub ids: Option<Vec<EventId>>,
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
    pub starts_after: Option<DateTime<Utc>>,
    pub starts_before: Option<DateTime<Utc>>,
    pub ends_after: Option<DateTime<Utc>>,
    pub ends_before: Option<DateTime<Utc>>,
    pub registration_required: Option<bool>,
    pub payment_required: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrderBy {
    #[default]
    StartTime,
    EndTime,
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventAggregate {
    pub count: i64,
    pub first_start: Option<DateTime<Utc>>,
    pub last_end: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_merged_window() {
        let now = Utc::now();
        let current = EventWindow {
            buffered_start_time: now,
            start_time: now,
            end_time: now + Duration::hours(1),
            buffered_end_time: now + Duration::hours(1),
        };
        let patch = EventPatch {
            end_time: Some(now + Duration::hours(2)),
            ..Default::default()
        };
        let merged = patch.merged_window(current);
        assert_eq!(merged.start_time, now);
        assert!(merged.validate().is_err());
    }
}
