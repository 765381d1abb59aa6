//! Term entity <-> model mapper

use club_core::entities::Term;
use club_core::inputs::{NewTerm, TermAggregate};
use club_core::value_objects::TermId;
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::InsertRow;
use crate::models::{TermAggregateModel, TermModel};

/// Convert TermModel to Term entity
impl From<TermModel> for Term {
    fn from(model: TermModel) -> Self {
        Term {
            id: TermId::new(model.id),
            term_name: model.term_name,
            app_release_date: model.app_release_date,
            app_soft_deadline: model.app_soft_deadline,
            app_hard_deadline: model.app_hard_deadline,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<TermAggregateModel> for TermAggregate {
    fn from(model: TermAggregateModel) -> Self {
        TermAggregate {
            count: model.count,
            earliest_release: model.earliest_release,
            latest_hard_deadline: model.latest_hard_deadline,
        }
    }
}

impl InsertRow for NewTerm {
    const COLUMNS: &'static str =
        "(term_name, app_release_date, app_soft_deadline, app_hard_deadline)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.term_name.clone())
            .push_bind(self.app_release_date)
            .push_bind(self.app_soft_deadline)
            .push_bind(self.app_hard_deadline);
    }
}
