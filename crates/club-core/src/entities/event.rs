//! Event entity - a scheduled club event
//!
//! The buffered times pad the advertised window; check-in is accepted for the
//! whole buffered window.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{EventId, ImageId};

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four timestamps that make up an event window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub buffered_start_time: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub buffered_end_time: DateTime<Utc>,
}

impl EventWindow {
    /// buffered_start <= start < end <= buffered_end
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_time >= self.end_time {
            return Err(DomainError::ValidationError(
                "start_time must be before end_time".to_string(),
            ));
        }
        if self.buffered_start_time > self.start_time {
            return Err(DomainError::ValidationError(
                "buffered_start_time must not be after start_time".to_string(),
            ));
        }
        if self.buffered_end_time < self.end_time {
            return Err(DomainError::ValidationError(
                "buffered_end_time must not be before end_time".to_string(),
            ));
        }
        Ok(())
    }
}

impl Event {
    pub fn window(&self) -> EventWindow {
        EventWindow {
            buffered_start_time: self.buffered_start_time,
            start_time: self.start_time,
            end_time: self.end_time,
            buffered_end_time: self.buffered_end_time,
        }
    }

    pub fn validate_times(&self) -> Result<(), DomainError> {
        self.window().validate()
    }

    /// Inside the buffered window (inclusive on both ends)
    pub fn is_check_in_open(&self, now: DateTime<Utc>) -> bool {
        self.buffered_start_time <= now && now <= self.buffered_end_time
    }

    /// Not yet ended; an event in progress still counts
    #[inline]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.has_ended(now)
    }

    #[inline]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event_at(start: DateTime<Utc>) -> Event {
        Event {
            id: EventId::new(10),
            name: "Resume Workshop".to_string(),
            registration_required: false,
            description: None,
            location: Some("MC 3003".to_string()),
            start_time: start,
            buffered_start_time: start - Duration::minutes(30),
            end_time: start + Duration::hours(2),
            buffered_end_time: start + Duration::hours(3),
            payment_required: false,
            image_id: None,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_validate_times() {
        let now = Utc::now();
        assert!(event_at(now).validate_times().is_ok());

        let mut event = event_at(now);
        event.end_time = event.start_time;
        assert!(event.validate_times().unwrap_err().is_validation());

        let mut event = event_at(now);
        event.buffered_start_time = now + Duration::minutes(1);
        assert!(event.validate_times().is_err());

        let mut event = event_at(now);
        event.buffered_end_time = event.end_time - Duration::minutes(1);
        assert!(event.validate_times().is_err());
    }

    #[test]
    fn test_check_in_window() {
        let start = Utc::now();
        let event = event_at(start);
        assert!(event.is_check_in_open(start - Duration::minutes(30)));
        assert!(event.is_check_in_open(start + Duration::hours(3)));
        assert!(!event.is_check_in_open(start - Duration::minutes(31)));
        assert!(!event.is_check_in_open(start + Duration::hours(4)));
    }

    #[test]
    fn test_upcoming() {
        let now = Utc::now();
        assert!(event_at(now + Duration::days(1)).is_upcoming(now));
        assert!(!event_at(now - Duration::days(1)).is_upcoming(now));
        assert!(event_at(now - Duration::days(1)).has_ended(now));

        let in_progress = event_at(now - Duration::hours(1));
        assert!(in_progress.is_upcoming(now));
        assert!(!in_progress.has_ended(now));
    }
}
