//! Enumerations shared by the schema and the API
//!
//! Stored as lowercase snake_case text in PostgreSQL and serialized the same
//! way in JSON, so `as_str` is the single source of truth for both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when a stored or submitted value is not a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Database / wire representation
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(EnumParseError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Membership tier of a profile
    UserStatus ("user status") {
        Member => "member",
        Admin => "admin",
        Exec => "exec",
    }
}

impl UserStatus {
    /// Admins and execs may use the admin surface
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Exec)
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Member
    }
}

string_enum! {
    /// Faculty a member studies in
    Faculty ("faculty") {
        Math => "math",
        Engineering => "engineering",
        Science => "science",
        Arts => "arts",
        Health => "health",
        Environment => "environment",
        OtherNonWaterloo => "other_non_waterloo",
    }
}

impl Faculty {
    #[must_use]
    pub fn is_math(self) -> bool {
        matches!(self, Self::Math)
    }
}

string_enum! {
    /// How a membership fee was paid
    PaymentMethod ("payment method") {
        Cash => "cash",
        Online => "online",
        MathSoc => "math_soc",
    }
}

string_enum! {
    /// Lifecycle of an application
    ApplicationStatus ("application status") {
        Draft => "draft",
        Submitted => "submitted",
        UnderReview => "under_review",
        Accepted => "accepted",
        Rejected => "rejected",
        Waitlisted => "waitlisted",
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl ApplicationStatus {
    /// Whether a review decision may move an application from `self` to `next`
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        use ApplicationStatus::{Accepted, Draft, Rejected, Submitted, UnderReview, Waitlisted};

        match (self, next) {
            (Draft, Submitted) => true,
            (Submitted, UnderReview | Accepted | Rejected | Waitlisted) => true,
            (UnderReview, Accepted | Rejected | Waitlisted) => true,
            (Waitlisted, Accepted | Rejected) => true,
            _ => false,
        }
    }

    /// Accepted and rejected applications never change again
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Only drafts can be edited by the applicant
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}

string_enum! {
    /// Position an applicant can apply for; also scopes questions
    Role ("role") {
        EventsExec => "events_exec",
        EventsCoVp => "events_co_vp",
        DesignExec => "design_exec",
        EducationExec => "education_exec",
        InternalExec => "internal_exec",
        OutreachExec => "outreach_exec",
        OutreachCoVp => "outreach_co_vp",
        DevelopmentExec => "development_exec",
        DevelopmentCoVp => "development_co_vp",
        SocialMediaExec => "social_media_exec",
        SocialMediaVp => "social_media_vp",
        ProjectLead => "project_lead",
        WorkshopLead => "workshop_lead",
        CxcCoVp => "cxc_co_vp",
        CxcExec => "cxc_exec",
        /// Questions every applicant answers
        General => "general",
        /// Optional extra questions shown to every applicant
        Supplementary => "supplementary",
    }
}

impl Role {
    /// Roles that are not real positions but question groupings
    #[must_use]
    pub fn is_shared(self) -> bool {
        matches!(self, Self::General | Self::Supplementary)
    }
}

string_enum! {
    /// Input widget of a question; decides which answer slot is used
    QuestionType ("question type") {
        Text => "text",
        Textarea => "textarea",
        MultipleChoice => "multiple_choice",
        FileUpload => "file_upload",
        Checkbox => "checkbox",
        Date => "date",
        Number => "number",
    }
}
