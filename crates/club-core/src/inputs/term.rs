use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct NewTerm {
    pub term_name: String,
    pub app_release_date: DateTime<Utc>,
    pub app_soft_deadline: DateTime<Utc>,
    pub app_hard_deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TermPatch {
    pub term_name: Option<String>,
    pub app_release_date: Option<DateTime<Utc>>,
    pub app_soft_deadline: Option<DateTime<Utc>>,
    pub app_hard_deadline: Option<DateTime<Utc>>,
}

impl TermPatch {
    pub fn is_empty(&self) -> bool {
        self.term_name.is_none()
            && self.app_release_date.is_none()
            && self.app_soft_deadline.is_none()
            && self.app_hard_deadline.is_none()
    }
}

impl From<&NewTerm> for TermPatch {
    fn from(term: &NewTerm) -> Self {
        Self {
            term_name: Some(term.term_name.clone()),
            app_release_date: Some(term.app_release_date),
            app_soft_deadline: Some(term.app_soft_deadline),
            app_hard_deadline: Some(term.app_hard_deadline),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TermFilter {
    pub term_name: Option<String>,
    pub released_before: Option<DateTime<Utc>>,
    pub hard_deadline_after: Option<DateTime<Utc>>,
}

impl TermFilter {
    /// Terms accepting applications at `now`
    pub fn open_at(now: DateTime<Utc>) -> Self {
        Self {
            term_name: None,
            released_before: Some(now),
            hard_deadline_after: Some(now),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TermOrderBy {
    #[default]
    AppReleaseDate,
    AppHardDeadline,
    TermName,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TermAggregate {
    pub count: i64,
    pub earliest_release: Option<DateTime<Utc>>,
    pub latest_hard_deadline: Option<DateTime<Utc>>,
}
