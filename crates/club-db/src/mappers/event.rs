//! Event entity <-> model mapper

use club_core::entities::Event;
use club_core::inputs::{EventAggregate, NewEvent};
use club_core::value_objects::{EventId, ImageId};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::InsertRow;
use crate::models::{EventAggregateModel, EventModel};

/// Convert EventModel to Event entity
impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: EventId::new(model.id),
            name: model.name,
            registration_required: model.registration_required,
            description: model.description,
            location: model.location,
            start_time: model.start_time,
            buffered_start_time: model.buffered_start_time,
            end_time: model.end_time,
            buffered_end_time: model.buffered_end_time,
            payment_required: model.payment_required,
            image_id: model.image_id.map(ImageId::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<EventAggregateModel> for EventAggregate {
    fn from(model: EventAggregateModel) -> Self {
        EventAggregate {
            count: model.count,
            first_start: model.first_start,
            last_end: model.last_end,
        }
    }
}

impl InsertRow for NewEvent {
    const COLUMNS: &'static str = "(name, registration_required, description, location, \
        start_time, buffered_start_time, end_time, buffered_end_time, payment_required, image_id)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        bind_event(self, row);
    }
}

/// A new event inserted under a caller-chosen id
pub struct EventWithId<'a>(pub EventId, pub &'a NewEvent);

impl InsertRow for EventWithId<'_> {
    const COLUMNS: &'static str = "(id, name, registration_required, description, location, \
        start_time, buffered_start_time, end_time, buffered_end_time, payment_required, image_id)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.0.into_inner());
        bind_event(self.1, row);
    }
}

fn bind_event<'args>(event: &NewEvent, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
    row.push_bind(event.name.clone())
        .push_bind(event.registration_required)
        .push_bind(event.description.clone())
        .push_bind(event.location.clone())
        .push_bind(event.start_time)
        .push_bind(event.buffered_start_time)
        .push_bind(event.end_time)
        .push_bind(event.buffered_end_time)
        .push_bind(event.payment_required)
        .push_bind(event.image_id.map(ImageId::into_inner));
}
