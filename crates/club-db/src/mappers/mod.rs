//! Entity to model mappers
//!
//! This module provides conversions between domain entities (club-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `InsertRow` impls: Bind write models as one `VALUES (...)` tuple

mod answer;
mod application;
mod attendance;
mod event;
mod profile;
mod question;
mod term;

pub use event::EventWithId;

use std::str::FromStr;

use club_core::error::DomainError;
use club_core::value_objects::{EnumParseError, Role};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

/// A write model that can be bound as one row of a multi-row INSERT
pub trait InsertRow: Send + Sync {
    /// Parenthesised column list, e.g. `(term_name, app_release_date)`
    const COLUMNS: &'static str;

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Parse a TEXT enum column; a failure means the row violates its CHECK
pub(crate) fn parse_column<T>(raw: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = EnumParseError>,
{
    raw.parse()
        .map_err(|e: EnumParseError| DomainError::InternalError(format!("corrupt row: {e}")))
}

/// Convert a batch of rows, failing on the first corrupt one
pub(crate) fn convert_all<M, E>(models: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    models.into_iter().map(E::try_from).collect()
}

pub(crate) fn parse_roles(raw: &[String]) -> Result<Vec<Role>, DomainError> {
    raw.iter().map(|r| parse_column(r)).collect()
}

pub(crate) fn roles_to_text(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::value_objects::Faculty;

    #[test]
    fn test_parse_column() {
        let faculty: Faculty = parse_column("math").unwrap();
        assert_eq!(faculty, Faculty::Math);

        let err = parse_column::<Faculty>("law").unwrap_err();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_roles_roundtrip_text() {
        let roles = vec![Role::CxcExec, Role::General];
        let text = roles_to_text(&roles);
        assert_eq!(text, vec!["cxc_exec", "general"]);
        assert_eq!(parse_roles(&text).unwrap(), roles);
    }
}
