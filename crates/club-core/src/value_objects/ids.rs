//! Typed identifiers
//!
//! Every table except `profile` uses a `BIGSERIAL` primary key. Each one gets its
//! own newtype so an `EventId` can never be passed where a `TermId` is expected.
//! IDs serialize as strings for JSON (JavaScript BigInt safety) and deserialize
//! from either strings or integers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Error when parsing an ID from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! bigint_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse from string representation
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(BigintVisitor).map(Self)
            }
        }
    };
}

/// Accepts `"123"`, `123`, or `123u64` for any bigint id
struct BigintVisitor;

impl<'de> serde::de::Visitor<'de> for BigintVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer representing an id")
    }

    fn visit_i64<E>(self, value: i64) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value).map_err(|_| E::custom("id out of range"))
    }

    fn visit_str<E>(self, value: &str) -> Result<i64, E>
    where
        E: serde::de::Error,
    {
        value
            .parse::<i64>()
            .map_err(|_| E::custom("invalid id string"))
    }
}

bigint_id!(
    /// Primary key of a `term` row
    TermId
);
bigint_id!(
    /// Primary key of an `application` row
    ApplicationId
);
bigint_id!(
    /// Surrogate primary key of a `question` row (not the human-assigned slug)
    QuestionId
);
bigint_id!(
    /// Primary key of an `application_answer` row
    AnswerId
);
bigint_id!(
    /// Primary key of an `event` row
    EventId
);
bigint_id!(
    /// Primary key of an `event_attendance` row
    AttendanceId
);
bigint_id!(
    /// Reference to an uploaded event image
    ImageId
);

/// Profile identifier - the identity provider's user UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Generate a random profile id (tests and seeding)
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError::InvalidFormat)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ProfileId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ProfileId> for Uuid {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ProfileId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigint_id_display_and_parse() {
        let id = TermId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<TermId>().unwrap(), id);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_bigint_id_parse_rejects_garbage() {
        assert_eq!(EventId::parse("abc"), Err(IdParseError::InvalidFormat));
        assert_eq!(EventId::parse(""), Err(IdParseError::InvalidFormat));
    }

    #[test]
    fn test_bigint_id_serializes_as_string() {
        let json = serde_json::to_string(&ApplicationId::new(9_007_199_254_740_993)).unwrap();
        assert_eq!(json, "\"9007199254740993\"");
    }

    #[test]
    fn test_bigint_id_deserializes_from_number_or_string() {
        let from_str: QuestionId = serde_json::from_str("\"17\"").unwrap();
        let from_num: QuestionId = serde_json::from_str("17").unwrap();
        assert_eq!(from_str, from_num);
        assert!(serde_json::from_str::<QuestionId>("\"x\"").is_err());
    }

    #[test]
    fn test_profile_id_parse() {
        let raw = "6f1c2f52-8a38-4c2b-9d53-1b0f7a3c2e11";
        let id = ProfileId::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw);
        assert!(ProfileId::parse("not-a-uuid").is_err());
    }
}
