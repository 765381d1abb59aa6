//! Filter structs rendered as WHERE clauses

use club_core::inputs::{
    ApplicationAnswerFilter, ApplicationFilter, EventAttendanceFilter, EventFilter,
    ProfileFilter, QuestionFilter, TermFilter,
};

use super::builder::Conditions;

/// A filter that knows how to render itself as predicates
pub trait SqlFilter: Send + Sync {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>);
}

impl SqlFilter for ProfileFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.any(
            "id",
            self.ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.into_inner()).collect::<Vec<_>>()),
        );
        c.eq("user_status", self.user_status.map(|s| s.as_str().to_string()));
        c.eq("has_paid", self.has_paid);
        c.eq("faculty", self.faculty.map(|f| f.as_str().to_string()));
        c.eq("is_math_soc_member", self.is_math_soc_member);
        c.eq("term", self.term.clone());
        c.gte("created_at", self.created_after);
        c.search(
            &["first_name", "last_name", "wat_iam"],
            self.search.as_deref(),
        );
    }
}

impl SqlFilter for TermFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.eq("term_name", self.term_name.clone());
        c.lte("app_release_date", self.released_before);
        c.gte("app_hard_deadline", self.hard_deadline_after);
    }
}

impl SqlFilter for ApplicationFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.any(
            "id",
            self.ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.into_inner()).collect::<Vec<_>>()),
        );
        c.eq("profile_id", self.profile_id.map(|id| id.into_inner()));
        c.eq("term_id", self.term_id.map(|id| id.into_inner()));
        c.any(
            "status",
            self.status.as_ref().map(|statuses| {
                statuses
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect::<Vec<_>>()
            }),
        );
        c.array_contains("roles_applying_for", self.role.map(|r| r.as_str().to_string()));
        c.is_set("submitted_at", self.submitted);
    }
}

impl SqlFilter for QuestionFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.eq("term_id", self.term_id.map(|id| id.into_inner()));
        c.any(
            "role",
            self.roles.as_ref().map(|roles| {
                roles
                    .iter()
                    .map(|r| r.as_str().to_string())
                    .collect::<Vec<_>>()
            }),
        );
        c.eq("\"type\"", self.question_type.map(|t| t.as_str().to_string()));
        c.eq("is_required", self.is_required);
    }
}

impl SqlFilter for ApplicationAnswerFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.eq("application_id", self.application_id.map(|id| id.into_inner()));
        c.eq("question_id", self.question_id.map(|id| id.into_inner()));
        c.any(
            "question_id",
            self.question_ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.into_inner()).collect::<Vec<_>>()),
        );
    }
}

impl SqlFilter for EventFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.any(
            "id",
            self.ids
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.into_inner()).collect::<Vec<_>>()),
        );
        c.search(&["name"], self.name_contains.as_deref());
        c.gte("start_time", self.starts_after);
        c.lte("start_time", self.starts_before);
        c.gte("end_time", self.ends_after);
        c.lt("end_time", self.ends_before);
        c.eq("registration_required", self.registration_required);
        c.eq("payment_required", self.payment_required);
    }
}

impl SqlFilter for EventAttendanceFilter {
    fn push_conditions(&self, c: &mut Conditions<'_, '_>) {
        c.eq("event_id", self.event_id.map(|id| id.into_inner()));
        c.eq("profile_id", self.profile_id.map(|id| id.into_inner()));
        c.eq("checked_in", self.checked_in);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::{ApplicationStatus, Role, TermId};
    use sqlx::{Postgres, QueryBuilder};

    fn render(filter: &dyn SqlFilter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM t");
        filter.push_conditions(&mut Conditions::new(&mut qb));
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        assert_eq!(render(&ProfileFilter::default()), "SELECT id FROM t");
        assert_eq!(render(&EventFilter::default()), "SELECT id FROM t");
    }

    #[test]
    fn test_application_filter() {
        let filter = ApplicationFilter {
            term_id: Some(TermId::new(4)),
            status: Some(vec![ApplicationStatus::Submitted, ApplicationStatus::UnderReview]),
            role: Some(Role::DesignExec),
            submitted: Some(true),
            ..ApplicationFilter::default()
        };
        assert_eq!(
            render(&filter),
            "SELECT id FROM t WHERE term_id = $1 AND status = ANY($2) \
             AND $3 = ANY(roles_applying_for) AND submitted_at IS NOT NULL"
        );
    }

    #[test]
    fn test_open_term_filter() {
        let filter = TermFilter::open_at(chrono::Utc::now());
        assert_eq!(
            render(&filter),
            "SELECT id FROM t WHERE app_release_date <= $1 AND app_hard_deadline >= $2"
        );
    }
}
