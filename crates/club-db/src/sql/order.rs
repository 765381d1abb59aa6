//! Sort columns per entity

use club_core::inputs::{
    AnswerOrderBy, ApplicationOrderBy, AttendanceOrderBy, EventOrderBy, ProfileOrderBy,
    QuestionOrderBy, TermOrderBy,
};

use super::builder::OrderColumn;

impl OrderColumn for ProfileOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl OrderColumn for TermOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::AppReleaseDate => "app_release_date",
            Self::AppHardDeadline => "app_hard_deadline",
            Self::TermName => "term_name",
            Self::CreatedAt => "created_at",
        }
    }
}

impl OrderColumn for ApplicationOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::SubmittedAt => "submitted_at",
        }
    }
}

impl OrderColumn for QuestionOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::OrderNum => "order_num",
            Self::Id => "id",
        }
    }
}

impl OrderColumn for AnswerOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl OrderColumn for EventOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

impl OrderColumn for AttendanceOrderBy {
    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Id => "id",
        }
    }
}
