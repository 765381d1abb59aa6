//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use club_core::entities::Event;
use club_core::error::DomainError;
use club_core::inputs::{EventAggregate, EventFilter, EventOrderBy, EventPatch, NewEvent};
use club_core::traits::{EventRepository, RepoResult};
use club_core::value_objects::EventId;
use club_core::{FindMany, SortOrder};

use crate::mappers::EventWithId;
use crate::models::{EventAggregateModel, EventModel};
use crate::sql::{Conditions, SqlFilter};

use super::crud::{self, Table};
use super::error::{map_db_error, map_write_error};

const EVENTS: Table = Table {
    name: "events",
    columns: "id, name, registration_required, description, location, start_time, \
              buffered_start_time, end_time, buffered_end_time, payment_required, image_id, \
              created_at, updated_at",
    touch: Some("updated_at"),
};

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: EventId) -> RepoResult<Option<Event>> {
        let result: Option<EventModel> = crud::find_by_id(&self.pool, &EVENTS, id.into_inner())
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &EventFilter,
        order_by: EventOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Event>> {
        let result: Option<EventModel> =
            crud::find_first(&self.pool, &EVENTS, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &FindMany<EventFilter, EventOrderBy>) -> RepoResult<Vec<Event>> {
        let rows: Vec<EventModel> = crud::find_many(&self.pool, &EVENTS, query)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(name = %event.name))]
    async fn create(&self, event: &NewEvent) -> RepoResult<Event> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: EventModel = crud::insert_one(&mut conn, &EVENTS, event)
            .await
            .map_err(map_write_error)?;

        Ok(model.into())
    }

    /// Events carry no natural key, so `skip_duplicates` never drops a row
    #[instrument(skip(self, events), fields(count = events.len()))]
    async fn create_many(&self, events: &[NewEvent], skip_duplicates: bool) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &EVENTS, events, skip_duplicates)
            .await
            .map_err(map_write_error)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, events), fields(count = events.len()))]
    async fn create_many_and_return(&self, events: &[NewEvent]) -> RepoResult<Vec<Event>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<EventModel> = crud::insert_many_returning(&mut tx, &EVENTS, events)
            .await
            .map_err(map_write_error)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event> {
        let result: Option<EventModel> = crud::update_by_id(&self.pool, &EVENTS, id.into_inner(), patch)
            .await
            .map_err(map_write_error)?;

        result.map(Event::from).ok_or(DomainError::EventNotFound(id))
    }

    #[instrument(skip(self, patch))]
    async fn update_many(&self, filter: &EventFilter, patch: &EventPatch) -> RepoResult<u64> {
        crud::update_many(&self.pool, &EVENTS, filter, patch)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, patch))]
    async fn update_many_and_return(
        &self,
        filter: &EventFilter,
        patch: &EventPatch,
    ) -> RepoResult<Vec<Event>> {
        let rows: Vec<EventModel> = crud::update_many_returning(&self.pool, &EVENTS, filter, patch)
            .await
            .map_err(map_write_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Keyed on id; the id sequence is moved past any explicitly inserted id
    #[instrument(skip(self, create, patch))]
    async fn upsert(&self, id: EventId, create: &NewEvent, patch: &EventPatch) -> RepoResult<Event> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model: EventModel =
            crud::upsert(&mut tx, &EVENTS, &EventWithId(id, create), "(id)", patch)
                .await
                .map_err(map_write_error)?;

        sqlx::query(
            r"
            SELECT setval(
                pg_get_serial_sequence('events', 'id'),
                GREATEST((SELECT MAX(id) FROM events), 1)
            )
            ",
        )
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EventId) -> RepoResult<Event> {
        let result: Option<EventModel> = crud::delete_by_id(&self.pool, &EVENTS, id.into_inner())
            .await
            .map_err(map_write_error)?;

        result.map(Event::from).ok_or(DomainError::EventNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &EventFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &EVENTS, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &EventFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &EVENTS, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn aggregate(&self, filter: &EventFilter) -> RepoResult<EventAggregate> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS count, MIN(start_time) AS first_start, MAX(end_time) AS last_end \
             FROM events",
        );
        filter.push_conditions(&mut Conditions::new(&mut qb));

        let model = qb
            .build_query_as::<EventAggregateModel>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEventRepository>();
    }
}
