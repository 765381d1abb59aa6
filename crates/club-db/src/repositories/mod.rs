//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.
//! Each repository handles database operations for a specific domain entity;
//! the statements they have in common live in `crud`.

mod answer;
mod application;
mod attendance;
mod crud;
mod error;
mod event;
mod profile;
mod question;
mod term;

pub use answer::PgApplicationAnswerRepository;
pub use application::PgApplicationRepository;
pub use attendance::PgEventAttendanceRepository;
pub use event::PgEventRepository;
pub use profile::PgProfileRepository;
pub use question::PgQuestionRepository;
pub use term::PgTermRepository;
