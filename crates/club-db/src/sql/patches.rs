//! Patch structs rendered as SET lists

use club_core::inputs::{
    ApplicationAnswerPatch, ApplicationPatch, EventAttendancePatch, EventPatch, ProfilePatch,
    QuestionPatch, TermPatch,
};

use super::builder::Assignments;

/// A patch that knows how to render its present fields as assignments
pub trait SqlPatch: Send + Sync {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>);
}

impl SqlPatch for ProfilePatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set("first_name", self.first_name.clone());
        s.set("last_name", self.last_name.clone());
        s.set("user_status", self.user_status.map(|v| v.as_str().to_string()));
        s.set("has_paid", self.has_paid);
        s.set_nullable("wat_iam", self.wat_iam.clone());
        s.set("faculty", self.faculty.map(|v| v.as_str().to_string()));
        s.set("term", self.term.clone());
        s.set("heard_from_where", self.heard_from_where.clone());
        s.set("payment_method", self.payment_method.map(|v| v.as_str().to_string()));
        s.set_nullable("payment_location", self.payment_location.clone());
        s.set_nullable("verifier", self.verifier.clone());
        s.set_nullable("member_ideas", self.member_ideas.clone());
        s.set("is_math_soc_member", self.is_math_soc_member);
    }
}

impl SqlPatch for TermPatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set("term_name", self.term_name.clone());
        s.set("app_release_date", self.app_release_date);
        s.set("app_soft_deadline", self.app_soft_deadline);
        s.set("app_hard_deadline", self.app_hard_deadline);
    }
}

impl SqlPatch for ApplicationPatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set(
            "roles_applying_for",
            self.roles_applying_for
                .as_ref()
                .map(|roles| crate::mappers::roles_to_text(roles)),
        );
        s.set_nullable("resume_path", self.resume_path.clone());
        s.set("status", self.status.map(|v| v.as_str().to_string()));
        s.set_nullable("comments", self.comments.clone());
        s.set_nullable("submitted_at", self.submitted_at);
    }
}

impl SqlPatch for QuestionPatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set("question_id", self.question_id.clone());
        s.set("role", self.role.map(|v| v.as_str().to_string()));
        s.set("\"type\"", self.question_type.map(|v| v.as_str().to_string()));
        s.set("question", self.question.clone());
        s.set("is_required", self.is_required);
        s.set("order_num", self.order_num);
        s.set_nullable("max_length", self.max_length);
        s.set_nullable("placeholder", self.placeholder.clone());
        s.set_nullable("help_text", self.help_text.clone());
    }
}

impl SqlPatch for ApplicationAnswerPatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set_nullable("answer_text", self.answer_text.clone());
        s.set_nullable("answer_option", self.answer_option.clone());
        s.set("answer_options", self.answer_options.clone());
        s.set_nullable("answer_file", self.answer_file.clone());
    }
}

impl SqlPatch for EventPatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set("name", self.name.clone());
        s.set("registration_required", self.registration_required);
        s.set_nullable("description", self.description.clone());
        s.set_nullable("location", self.location.clone());
        s.set("start_time", self.start_time);
        s.set("buffered_start_time", self.buffered_start_time);
        s.set("end_time", self.end_time);
        s.set("buffered_end_time", self.buffered_end_time);
        s.set("payment_required", self.payment_required);
        s.set_nullable("image_id", self.image_id.map(|id| id.map(|v| v.into_inner())));
    }
}

impl SqlPatch for EventAttendancePatch {
    fn push_assignments(&self, s: &mut Assignments<'_, '_>) {
        s.set("checked_in", self.checked_in);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::Faculty;
    use sqlx::{Postgres, QueryBuilder};

    #[test]
    fn test_profile_patch_sql() {
        let patch = ProfilePatch {
            faculty: Some(Faculty::Math),
            wat_iam: Some(None),
            ..ProfilePatch::default()
        }
        .with_derived_math_soc();

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE profiles SET ");
        let mut s = Assignments::new(&mut qb);
        patch.push_assignments(&mut s);
        s.finish(Some("updated_at"), "id", "id");

        assert_eq!(
            qb.sql(),
            "UPDATE profiles SET wat_iam = $1, faculty = $2, is_math_soc_member = $3, updated_at = NOW()"
        );
    }
}
