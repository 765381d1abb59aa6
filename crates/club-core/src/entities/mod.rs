//! Domain entities

mod answer;
mod application;
mod attendance;
mod event;
mod profile;
mod question;
mod term;

pub use answer::{AnswerSlots, ApplicationAnswer};
pub use application::{dedup_roles, Application};
pub use attendance::EventAttendance;
pub use event::{Event, EventWindow};
pub use profile::Profile;
pub use question::{is_valid_slug, Question};
pub use term::{validate_term_deadlines, Term};
