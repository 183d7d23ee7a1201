//! Community discussion threads.

use crate::errors::QueryError;
use crate::identifiers::ThreadId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual kind of a thread tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagKind {
    /// Neutral styling
    #[default]
    Default,
    /// Algorithm discussion
    Algorithm,
    /// Help with a failing solution
    Debugging,
    /// Python-specific
    Python,
    /// JavaScript-specific
    Javascript,
    /// Java-specific
    Java,
    /// Style and idioms
    BestPractice,
}

impl TagKind {
    /// Kebab-case kind id
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Algorithm => "algorithm",
            Self::Debugging => "debugging",
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Java => "java",
            Self::BestPractice => "best-practice",
        }
    }
}

/// Tag attached to a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadTag {
    /// Label shown on the chip
    pub name: String,
    /// Visual kind; also drives category filtering
    #[serde(default)]
    pub kind: TagKind,
}

impl ThreadTag {
    /// Create a tag
    pub fn new(name: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Thread author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadAuthor {
    /// Display name
    pub name: String,
    /// Reputation points
    pub reputation: u32,
}

/// A discussion thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionThread {
    /// Thread id
    pub id: ThreadId,
    /// Who opened the thread
    pub author: ThreadAuthor,
    /// Headline
    pub title: String,
    /// Opening post body
    pub content: String,
    /// Tags in display order
    pub tags: Vec<ThreadTag>,
    /// Relative label as authored ("2 hours ago", "Yesterday")
    pub posted: String,
    /// Reply count
    pub replies: u32,
    /// Upvote count
    pub upvotes: u32,
    /// A reply has been marked as the best answer
    pub has_best_answer: bool,
}

/// Category buttons above the thread list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadCategory {
    /// Every thread
    #[default]
    All,
    /// Threads tagged with an algorithm kind
    Algorithms,
    /// Tag kinds containing `question`; no current kind does
    Questions,
    /// Tag kinds containing `solution`; no current kind does
    Solutions,
}

impl ThreadCategory {
    /// Text a tag kind must contain for the thread to fall in this category.
    /// `None` for [`ThreadCategory::All`].
    pub fn kind_fragment(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Algorithms => Some("algorithm"),
            Self::Questions => Some("question"),
            Self::Solutions => Some("solution"),
        }
    }
}

impl FromStr for ThreadCategory {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "algorithms" => Ok(Self::Algorithms),
            "questions" => Ok(Self::Questions),
            "solutions" => Ok(Self::Solutions),
            _ => Err(QueryError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for ThreadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Algorithms => "algorithms",
            Self::Questions => "questions",
            Self::Solutions => "solutions",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_kind_serde() {
        let tag = ThreadTag::new("Best Practices", TagKind::BestPractice);
        let json = serde_json::to_string(&tag).unwrap();
        assert!(json.contains("\"best-practice\""));
    }

    #[test]
    fn test_category_fragment() {
        assert_eq!(ThreadCategory::All.kind_fragment(), None);
        assert_eq!(ThreadCategory::Algorithms.kind_fragment(), Some("algorithm"));
        assert!("Solutions".parse::<ThreadCategory>().is_ok());
        assert!("news".parse::<ThreadCategory>().is_err());
    }
}
