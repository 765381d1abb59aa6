//! PostgreSQL implementation of EventAttendanceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::EventAttendance;
use club_core::error::DomainError;
use club_core::inputs::{
    AttendanceOrderBy, AttendanceSummary, EventAttendanceFilter, EventAttendancePatch,
    NewEventAttendance,
};
use club_core::traits::{EventAttendanceRepository, RepoResult};
use club_core::value_objects::{AttendanceId, EventId, ProfileId};
use club_core::{FindMany, GroupCount, SortOrder};

use crate::models::{AttendanceSummaryModel, EventAttendanceModel};

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const ATTENDANCE: Table = Table {
    name: "event_attendance",
    columns: "id, event_id, profile_id, checked_in, created_at",
    touch: None,
};

fn already_registered(e: sqlx::Error) -> DomainError {
    map_unique_violation(e, || DomainError::AlreadyRegistered)
}

/// PostgreSQL implementation of EventAttendanceRepository
#[derive(Clone)]
pub struct PgEventAttendanceRepository {
    pool: PgPool,
}

impl PgEventAttendanceRepository {
    /// Create a new PgEventAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventAttendanceRepository for PgEventAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: AttendanceId) -> RepoResult<Option<EventAttendance>> {
        let result: Option<EventAttendanceModel> =
            crud::find_by_id(&self.pool, &ATTENDANCE, id.into_inner())
                .await
                .map_err(map_db_error)?;

        Ok(result.map(EventAttendance::from))
    }

    #[instrument(skip(self))]
    async fn find_by_event_and_profile(
        &self,
        event_id: EventId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<EventAttendance>> {
        let result = sqlx::query_as::<_, EventAttendanceModel>(
            r"
            SELECT id, event_id, profile_id, checked_in, created_at
            FROM event_attendance
            WHERE event_id = $1 AND profile_id = $2
            ",
        )
        .bind(event_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EventAttendance::from))
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &EventAttendanceFilter,
        order_by: AttendanceOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<EventAttendance>> {
        let result: Option<EventAttendanceModel> =
            crud::find_first(&self.pool, &ATTENDANCE, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(EventAttendance::from))
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        query: &FindMany<EventAttendanceFilter, AttendanceOrderBy>,
    ) -> RepoResult<Vec<EventAttendance>> {
        let rows: Vec<EventAttendanceModel> = crud::find_many(&self.pool, &ATTENDANCE, query)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(EventAttendance::from).collect())
    }

    #[instrument(skip(self, attendance), fields(event_id = %attendance.event_id, profile_id = %attendance.profile_id))]
    async fn create(&self, attendance: &NewEventAttendance) -> RepoResult<EventAttendance> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: EventAttendanceModel = crud::insert_one(&mut conn, &ATTENDANCE, attendance)
            .await
            .map_err(already_registered)?;

        Ok(model.into())
    }

    #[instrument(skip(self, attendances), fields(count = attendances.len()))]
    async fn create_many(
        &self,
        attendances: &[NewEventAttendance],
        skip_duplicates: bool,
    ) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &ATTENDANCE, attendances, skip_duplicates)
            .await
            .map_err(already_registered)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, attendances), fields(count = attendances.len()))]
    async fn create_many_and_return(
        &self,
        attendances: &[NewEventAttendance],
    ) -> RepoResult<Vec<EventAttendance>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<EventAttendanceModel> =
            crud::insert_many_returning(&mut tx, &ATTENDANCE, attendances)
                .await
                .map_err(already_registered)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(rows.into_iter().map(EventAttendance::from).collect())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        id: AttendanceId,
        patch: &EventAttendancePatch,
    ) -> RepoResult<EventAttendance> {
        let result: Option<EventAttendanceModel> =
            crud::update_by_id(&self.pool, &ATTENDANCE, id.into_inner(), patch)
                .await
                .map_err(map_write_error)?;

        result
            .map(EventAttendance::from)
            .ok_or(DomainError::AttendanceNotFound(id))
    }

    #[instrument(skip(self))]
    async fn update_many(
        &self,
        filter: &EventAttendanceFilter,
        patch: &EventAttendancePatch,
    ) -> RepoResult<u64> {
        crud::update_many(&self.pool, &ATTENDANCE, filter, patch)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn update_many_and_return(
        &self,
        filter: &EventAttendanceFilter,
        patch: &EventAttendancePatch,
    ) -> RepoResult<Vec<EventAttendance>> {
        let rows: Vec<EventAttendanceModel> =
            crud::update_many_returning(&self.pool, &ATTENDANCE, filter, patch)
                .await
                .map_err(map_write_error)?;

        Ok(rows.into_iter().map(EventAttendance::from).collect())
    }

    /// Keyed on (event_id, profile_id)
    #[instrument(skip(self))]
    async fn upsert(
        &self,
        create: &NewEventAttendance,
        patch: &EventAttendancePatch,
    ) -> RepoResult<EventAttendance> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: EventAttendanceModel =
            crud::upsert(&mut conn, &ATTENDANCE, create, "(event_id, profile_id)", patch)
                .await
                .map_err(map_write_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AttendanceId) -> RepoResult<EventAttendance> {
        let result: Option<EventAttendanceModel> =
            crud::delete_by_id(&self.pool, &ATTENDANCE, id.into_inner())
                .await
                .map_err(map_write_error)?;

        result
            .map(EventAttendance::from)
            .ok_or(DomainError::AttendanceNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &EventAttendanceFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &ATTENDANCE, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &EventAttendanceFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &ATTENDANCE, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn summary(&self, event_id: EventId) -> RepoResult<AttendanceSummary> {
        let model = sqlx::query_as::<_, AttendanceSummaryModel>(
            r"
            SELECT COUNT(*) AS registered,
                   COUNT(*) FILTER (WHERE checked_in) AS checked_in
            FROM event_attendance
            WHERE event_id = $1
            ",
        )
        .bind(event_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn group_by_event(
        &self,
        filter: &EventAttendanceFilter,
    ) -> RepoResult<Vec<GroupCount<EventId>>> {
        let rows: Vec<(i64, i64)> = crud::group_count(&self.pool, &ATTENDANCE, "event_id", filter)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(key, count)| GroupCount {
                key: EventId::new(key),
                count,
            })
            .collect())
    }

    /// A single INSERT ... ON CONFLICT, so concurrent check-ins converge on one row
    #[instrument(skip(self))]
    async fn check_in(&self, event_id: EventId, profile_id: ProfileId) -> RepoResult<EventAttendance> {
        let model = sqlx::query_as::<_, EventAttendanceModel>(
            r"
            INSERT INTO event_attendance (event_id, profile_id, checked_in)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (event_id, profile_id) DO UPDATE SET checked_in = TRUE
            RETURNING id, event_id, profile_id, checked_in, created_at
            ",
        )
        .bind(event_id.into_inner())
        .bind(profile_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgEventAttendanceRepository>();
    }
}
