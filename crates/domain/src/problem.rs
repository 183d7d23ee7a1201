//! Practice problems and the topic taxonomy.

use crate::errors::QueryError;
use crate::identifiers::ProblemId;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy
    Easy,
    /// Medium
    Medium,
    /// Hard
    Hard,
}

impl Difficulty {
    /// All difficulties in ascending order
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase tag used in selections and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Capitalized label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QueryError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Topic taxonomy. Each topic has a short id and a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Arrays
    Arrays,
    /// Strings
    Strings,
    /// Linked Lists
    #[serde(rename = "linkedlist")]
    LinkedList,
    /// Trees
    Trees,
    /// Graphs
    Graphs,
    /// Dynamic Programming
    Dp,
    /// Greedy Algorithms
    Greedy,
    /// Sorting
    Sorting,
    /// Searching
    Searching,
    /// Mathematics
    Math,
    /// Recursion
    Recursion,
    /// Bit Manipulation
    #[serde(rename = "bitmanipulation")]
    BitManipulation,
}

impl Topic {
    /// Every topic, in taxonomy order
    pub const ALL: [Topic; 12] = [
        Self::Arrays,
        Self::Strings,
        Self::LinkedList,
        Self::Trees,
        Self::Graphs,
        Self::Dp,
        Self::Greedy,
        Self::Sorting,
        Self::Searching,
        Self::Math,
        Self::Recursion,
        Self::BitManipulation,
    ];

    /// Short topic id
    pub fn id(&self) -> &'static str {
        match self {
            Self::Arrays => "arrays",
            Self::Strings => "strings",
            Self::LinkedList => "linkedlist",
            Self::Trees => "trees",
            Self::Graphs => "graphs",
            Self::Dp => "dp",
            Self::Greedy => "greedy",
            Self::Sorting => "sorting",
            Self::Searching => "searching",
            Self::Math => "math",
            Self::Recursion => "recursion",
            Self::BitManipulation => "bitmanipulation",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Arrays => "Arrays",
            Self::Strings => "Strings",
            Self::LinkedList => "Linked Lists",
            Self::Trees => "Trees",
            Self::Graphs => "Graphs",
            Self::Dp => "Dynamic Programming",
            Self::Greedy => "Greedy Algorithms",
            Self::Sorting => "Sorting",
            Self::Searching => "Searching",
            Self::Math => "Mathematics",
            Self::Recursion => "Recursion",
            Self::BitManipulation => "Bit Manipulation",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Topic {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| QueryError::UnknownTopic(s.to_string()))
    }
}

/// Worked example shown with a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemExample {
    /// Input as shown
    pub input: String,
    /// Expected output as shown
    pub output: String,
    /// Why the output is correct
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Hidden test case used by the judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Raw input fed to the solution
    pub input: String,
    /// Output the judge compares against
    pub expected_output: String,
}

/// A practice problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem id
    pub id: ProblemId,
    /// Title
    pub title: String,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Ordered, duplicate-free topic set
    pub topics: IndexSet<Topic>,
    /// Popularity score; higher is more popular
    pub popularity: u32,
    /// Percentage in `0..=100`
    pub success_rate: u8,
    /// Total attempts across users
    pub attempt_count: u32,
    /// Shows the "new" badge
    pub is_new: bool,
    /// When the problem was published
    pub created_at: DateTime<Utc>,
    /// Statement body
    #[serde(default)]
    pub description: String,
    /// Worked examples
    #[serde(default)]
    pub examples: Vec<ProblemExample>,
    /// Input constraints, one per line
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Hidden judge cases
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Problem {
    /// Display names of the problem's topics, in order
    pub fn topic_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.topics.iter().map(Topic::display_name)
    }

    /// Whether the problem carries at least one of `wanted`
    pub fn has_any_topic(&self, wanted: &IndexSet<Topic>) -> bool {
        self.topics.iter().any(|t| wanted.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_taxonomy() {
        assert_eq!(Topic::ALL.len(), 12);
        assert_eq!(Topic::Dp.display_name(), "Dynamic Programming");
        assert_eq!("linkedlist".parse::<Topic>().unwrap(), Topic::LinkedList);
        assert_eq!("BitManipulation".parse::<Topic>().unwrap(), Topic::BitManipulation);
        assert!("heaps".parse::<Topic>().is_err());
    }

    #[test]
    fn test_topic_serde_uses_ids() {
        for topic in Topic::ALL {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.id()));
        }
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "extreme".parse::<Difficulty>(),
            Err(QueryError::UnknownDifficulty("extreme".into()))
        );
    }
}
