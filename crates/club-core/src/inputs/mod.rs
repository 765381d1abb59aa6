//! Write models, patches, filters, orderings and aggregate results per entity

mod answer;
mod application;
mod attendance;
mod event;
mod profile;
mod question;
mod term;

pub use answer::{
    AnswerOrderBy, ApplicationAnswerFilter, ApplicationAnswerPatch, NewApplicationAnswer,
};
pub use application::{
    ApplicationAggregate, ApplicationFilter, ApplicationOrderBy, ApplicationPatch,
    NewApplication,
};
pub use attendance::{
    AttendanceOrderBy, AttendanceSummary, EventAttendanceFilter, EventAttendancePatch,
    NewEventAttendance,
};
pub use event::{EventAggregate, EventFilter, EventOrderBy, EventPatch, NewEvent};
pub use profile::{MembershipStats, NewProfile, ProfileFilter, ProfileOrderBy, ProfilePatch};
pub use question::{NewQuestion, QuestionFilter, QuestionOrderBy, QuestionPatch};
pub use term::{NewTerm, TermAggregate, TermFilter, TermOrderBy, TermPatch};
