//! Value objects - immutable types that represent domain concepts

mod enums;
mod ids;

pub use enums::{
    ApplicationStatus, EnumParseError, Faculty, PaymentMethod, QuestionType, Role, UserStatus,
};
pub use ids::{
    AnswerId, ApplicationId, AttendanceId, EventId, IdParseError, ImageId, ProfileId, QuestionId,
    TermId,
};
