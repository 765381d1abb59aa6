//! Table-generic statements shared by the repositories
//!
//! Each repository supplies its [`Table`] description and row model; the
//! filter, patch and ordering come from `crate::sql`.

use club_core::FindMany;
use sqlx::postgres::PgRow;
use sqlx::{
    Decode, Encode, FromRow, PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder, Type,
};

use crate::mappers::InsertRow;
use crate::sql::{push_order, push_page, Assignments, Conditions, OrderColumn, SqlFilter, SqlPatch};

/// Rows per multi-row INSERT, well under the 65535 bind parameter limit
const INSERT_CHUNK: usize = 1000;

/// Static description of a table
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    /// Select list matching the row model
    pub columns: &'static str,
    /// `updated_at` column, when the table tracks one
    pub touch: Option<&'static str>,
}

impl Table {
    fn select<'args>(&self) -> QueryBuilder<'args, Postgres> {
        QueryBuilder::new(format!("SELECT {} FROM {}", self.columns, self.name))
    }

    fn update<'args>(&self) -> QueryBuilder<'args, Postgres> {
        QueryBuilder::new(format!("UPDATE {} SET ", self.name))
    }

    fn returning(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" RETURNING ").push(self.columns);
    }
}

fn build_insert<'args, R: InsertRow>(table: &Table, rows: &[R]) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {} {} ", table.name, R::COLUMNS));
    qb.push_values(rows, |mut b, row| row.bind_values(&mut b));
    qb
}

/// Insert one row and return it
pub async fn insert_one<M, R>(conn: &mut PgConnection, table: &Table, row: &R) -> Result<M, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    R: InsertRow,
{
    let mut qb = build_insert(table, std::slice::from_ref(row));
    table.returning(&mut qb);
    qb.build_query_as::<M>().fetch_one(conn).await
}

/// Insert rows in chunks; with `skip_duplicates` conflicting rows are dropped
/// and excluded from the returned count
pub async fn insert_many<R: InsertRow>(
    conn: &mut PgConnection,
    table: &Table,
    rows: &[R],
    skip_duplicates: bool,
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut qb = build_insert(table, chunk);
        if skip_duplicates {
            qb.push(" ON CONFLICT DO NOTHING");
        }
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

pub async fn insert_many_returning<M, R>(
    conn: &mut PgConnection,
    table: &Table,
    rows: &[R],
) -> Result<Vec<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    R: InsertRow,
{
    let mut out = Vec::with_capacity(rows.len());
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut qb = build_insert(table, chunk);
        table.returning(&mut qb);
        out.extend(qb.build_query_as::<M>().fetch_all(&mut *conn).await?);
    }
    Ok(out)
}

fn build_upsert<'args, R: InsertRow, P: SqlPatch>(
    table: &Table,
    row: &R,
    conflict_target: &str,
    patch: &P,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = build_insert(table, std::slice::from_ref(row));
    qb.push(" ON CONFLICT ")
        .push(conflict_target)
        .push(" DO UPDATE SET ");
    let mut set = Assignments::new(&mut qb);
    patch.push_assignments(&mut set);
    // a bare `id` is ambiguous against EXCLUDED
    set.finish(table.touch, "id", &format!("{}.id", table.name));
    table.returning(&mut qb);
    qb
}

/// `INSERT ... ON CONFLICT <target> DO UPDATE SET <patch>`
///
/// An empty patch still returns the existing row.
pub async fn upsert<M, R, P>(
    conn: &mut PgConnection,
    table: &Table,
    row: &R,
    conflict_target: &str,
    patch: &P,
) -> Result<M, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    R: InsertRow,
    P: SqlPatch,
{
    let mut qb = build_upsert(table, row, conflict_target, patch);
    qb.build_query_as::<M>().fetch_one(conn).await
}

pub async fn find_by_id<M, K>(pool: &PgPool, table: &Table, id: K) -> Result<Option<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    K: for<'q> Encode<'q, Postgres> + Type<Postgres> + Send + 'static,
{
    let mut qb = table.select();
    Conditions::new(&mut qb).eq("id", Some(id));
    qb.build_query_as::<M>().fetch_optional(pool).await
}

pub async fn find_first<M, F, O>(
    pool: &PgPool,
    table: &Table,
    filter: &F,
    order_by: &O,
    order: club_core::SortOrder,
) -> Result<Option<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: SqlFilter,
    O: OrderColumn,
{
    let mut qb = table.select();
    filter.push_conditions(&mut Conditions::new(&mut qb));
    push_order(&mut qb, order_by, order);
    qb.push(" LIMIT 1");
    qb.build_query_as::<M>().fetch_optional(pool).await
}

fn build_find_many<'args, F: SqlFilter, O: OrderColumn>(
    table: &Table,
    query: &FindMany<F, O>,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = table.select();
    query.filter.push_conditions(&mut Conditions::new(&mut qb));
    push_order(&mut qb, &query.order_by, query.order);
    if let Some(page) = query.page {
        push_page(&mut qb, page);
    }
    qb
}

pub async fn find_many<M, F, O>(
    pool: &PgPool,
    table: &Table,
    query: &FindMany<F, O>,
) -> Result<Vec<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: SqlFilter,
    O: OrderColumn,
{
    let mut qb = build_find_many(table, query);
    qb.build_query_as::<M>().fetch_all(pool).await
}

pub async fn count<F: SqlFilter>(pool: &PgPool, table: &Table, filter: &F) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", table.name));
    filter.push_conditions(&mut Conditions::new(&mut qb));
    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

/// Patch one row by primary key, returning it when it exists
pub async fn update_by_id<'e, E, M, K, P>(
    executor: E,
    table: &Table,
    id: K,
    patch: &P,
) -> Result<Option<M>, sqlx::Error>
where
    E: PgExecutor<'e>,
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    K: for<'q> Encode<'q, Postgres> + Type<Postgres> + Send + 'static,
    P: SqlPatch,
{
    let mut qb = table.update();
    let mut set = Assignments::new(&mut qb);
    patch.push_assignments(&mut set);
    set.finish(table.touch, "id", "id");
    Conditions::new(&mut qb).eq("id", Some(id));
    table.returning(&mut qb);
    qb.build_query_as::<M>().fetch_optional(executor).await
}

fn build_update_many<'args, F: SqlFilter, P: SqlPatch>(
    table: &Table,
    filter: &F,
    patch: &P,
) -> QueryBuilder<'args, Postgres> {
    let mut qb = table.update();
    let mut set = Assignments::new(&mut qb);
    patch.push_assignments(&mut set);
    set.finish(table.touch, "id", "id");
    filter.push_conditions(&mut Conditions::new(&mut qb));
    qb
}

pub async fn update_many<F: SqlFilter, P: SqlPatch>(
    pool: &PgPool,
    table: &Table,
    filter: &F,
    patch: &P,
) -> Result<u64, sqlx::Error> {
    let mut qb = build_update_many(table, filter, patch);
    Ok(qb.build().execute(pool).await?.rows_affected())
}

pub async fn update_many_returning<M, F, P>(
    pool: &PgPool,
    table: &Table,
    filter: &F,
    patch: &P,
) -> Result<Vec<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: SqlFilter,
    P: SqlPatch,
{
    let mut qb = build_update_many(table, filter, patch);
    table.returning(&mut qb);
    qb.build_query_as::<M>().fetch_all(pool).await
}

/// Delete one row by primary key, returning it when it existed
pub async fn delete_by_id<M, K>(pool: &PgPool, table: &Table, id: K) -> Result<Option<M>, sqlx::Error>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    K: for<'q> Encode<'q, Postgres> + Type<Postgres> + Send + 'static,
{
    let mut qb = QueryBuilder::new(format!("DELETE FROM {}", table.name));
    Conditions::new(&mut qb).eq("id", Some(id));
    table.returning(&mut qb);
    qb.build_query_as::<M>().fetch_optional(pool).await
}

pub async fn delete_many<F: SqlFilter>(pool: &PgPool, table: &Table, filter: &F) -> Result<u64, sqlx::Error> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {}", table.name));
    filter.push_conditions(&mut Conditions::new(&mut qb));
    Ok(qb.build().execute(pool).await?.rows_affected())
}

/// `SELECT key, COUNT(*) ... GROUP BY key ORDER BY key`
pub async fn group_count<K, F>(
    pool: &PgPool,
    table: &Table,
    key_column: &str,
    filter: &F,
) -> Result<Vec<(K, i64)>, sqlx::Error>
where
    K: for<'r> Decode<'r, Postgres> + Type<Postgres> + Send + Unpin,
    F: SqlFilter,
{
    let mut qb = QueryBuilder::new(format!(
        "SELECT {key_column}, COUNT(*) FROM {}",
        table.name
    ));
    filter.push_conditions(&mut Conditions::new(&mut qb));
    qb.push(format!(" GROUP BY {key_column} ORDER BY {key_column}"));
    qb.build_query_as::<(K, i64)>().fetch_all(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use club_core::inputs::{
        EventAttendancePatch, NewEventAttendance, NewTerm, TermFilter, TermOrderBy, TermPatch,
    };
    use club_core::SortOrder;
    use club_core::value_objects::{EventId, ProfileId};

    const TERMS: Table = Table {
        name: "terms",
        columns: "id, term_name",
        touch: Some("updated_at"),
    };

    #[test]
    fn test_update_many_sql() {
        let filter = TermFilter {
            term_name: Some("F25".to_string()),
            ..TermFilter::default()
        };
        let patch = TermPatch {
            term_name: Some("Fall 2025".to_string()),
            ..TermPatch::default()
        };
        let mut qb = build_update_many(&TERMS, &filter, &patch);
        TERMS.returning(&mut qb);
        assert_eq!(
            qb.sql(),
            "UPDATE terms SET term_name = $1, updated_at = NOW() WHERE term_name = $2 RETURNING id, term_name"
        );
    }

    #[test]
    fn test_upsert_sql() {
        let at = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        let term = NewTerm {
            term_name: "F25".to_string(),
            app_release_date: at,
            app_soft_deadline: at,
            app_hard_deadline: at,
        };
        let qb = build_upsert(&TERMS, &term, "(term_name)", &TermPatch::default());
        assert_eq!(
            qb.sql(),
            "INSERT INTO terms (term_name, app_release_date, app_soft_deadline, app_hard_deadline) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (term_name) DO UPDATE SET updated_at = NOW() \
             RETURNING id, term_name"
        );
    }

    #[test]
    fn test_find_many_unpaged_has_no_limit() {
        let filter = TermFilter {
            term_name: Some("F25".to_string()),
            ..TermFilter::default()
        };
        let paged = build_find_many(
            &TERMS,
            &FindMany::new(filter.clone()).order_by(TermOrderBy::default(), SortOrder::Asc),
        );
        assert!(paged.sql().ends_with(" LIMIT $2 OFFSET $3"));

        let all = build_find_many(
            &TERMS,
            &FindMany::<_, TermOrderBy>::new(filter).unpaged(),
        );
        assert!(!all.sql().contains("LIMIT"));
    }

    #[test]
    fn test_upsert_without_touch_qualifies_noop() {
        const ATTENDANCE: Table = Table {
            name: "event_attendance",
            columns: "id, checked_in",
            touch: None,
        };
        let row = NewEventAttendance {
            event_id: EventId::new(1),
            profile_id: ProfileId::new_v4(),
            checked_in: false,
        };
        let qb = build_upsert(
            &ATTENDANCE,
            &row,
            "(event_id, profile_id)",
            &EventAttendancePatch::default(),
        );
        assert!(qb
            .sql()
            .ends_with("DO UPDATE SET id = event_attendance.id RETURNING id, checked_in"));
    }
}
