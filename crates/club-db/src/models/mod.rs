//! Database models - SQLx-compatible structs for PostgreSQL tables
//!
//! Enumerations are stored as `TEXT` with CHECK constraints and decoded as
//! `String`; the mappers parse them into the domain enums.

mod answer;
mod application;
mod attendance;
mod event;
mod profile;
mod question;
mod term;

pub use answer::ApplicationAnswerModel;
pub use application::ApplicationModel;
pub use attendance::{AttendanceSummaryModel, EventAttendanceModel};
pub use event::{EventAggregateModel, EventModel};
pub use profile::{MembershipStatsModel, ProfileModel};
pub use question::QuestionModel;
pub use term::{TermAggregateModel, TermModel};
