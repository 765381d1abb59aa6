mod repositories;

pub use repositories::{
    ApplicationAnswerRepository, ApplicationRepository, EventAttendanceRepository,
    EventRepository, ProfileRepository, QuestionRepository, RepoResult, TermRepository,
};
