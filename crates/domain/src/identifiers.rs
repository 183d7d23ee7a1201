//! Strongly-typed identifier types for the CodeArena domain.
//!
//! Records arrive from the catalogs with short human-readable ids
//! (`problem-1`, `u3`, `sub-2`), so every id wraps a string. The newtypes keep
//! a problem id from being passed where a submission id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from any string-like value
            #[inline]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the id as a string slice
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the underlying string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProblemId, "Identifier of a practice problem (e.g. `problem-1`)");

define_id!(UserId, "Identifier of a leaderboard user (e.g. `u1`, `f2`)");

define_id!(SubmissionId, "Identifier of a submission record (e.g. `sub-1`)");

define_id!(ThreadId, "Identifier of a community discussion thread");

define_id!(
    ContestId,
    "Identifier of a contest; generated ids use time-ordered UUID v7 text"
);

impl ContestId {
    /// Generate a fresh contest id
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_roundtrip() {
        let id = ProblemId::new("problem-7");
        assert_eq!(id.to_string(), "problem-7");
        let parsed: ProblemId = "problem-7".parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = SubmissionId::from("sub-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"sub-1\"");
    }

    #[test]
    fn test_generated_contest_ids_differ() {
        let a = ContestId::generate();
        let b = ContestId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }
}
