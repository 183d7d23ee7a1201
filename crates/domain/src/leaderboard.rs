//! Leaderboard users, ranking trends and achievements.

use crate::errors::QueryError;
use crate::identifiers::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Movement of a user's rank since the previous period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingTrend {
    /// Moved up
    Up,
    /// Moved down
    Down,
    /// Unchanged
    Stable,
}

/// Badge earned by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    /// Solved the first hundred problems
    First100,
    /// Best debugger
    BestDebugger,
    /// Accepted a challenge
    ChallengeAcceptor,
    /// Fastest coder
    FastestCoder,
    /// Long daily streak
    StreakMaster,
    /// Coding guru
    CodingGuru,
    /// Algorithm master
    AlgorithmMaster,
    /// Problem solver
    ProblemSolver,
    /// Consistent learner
    ConsistentLearner,
    /// Ranked in the top ten
    Top10,
}

impl Achievement {
    /// Badge label, e.g. "Best Debugger"
    pub fn label(&self) -> &'static str {
        match self {
            Self::First100 => "First100",
            Self::BestDebugger => "Best Debugger",
            Self::ChallengeAcceptor => "Challenge Acceptor",
            Self::FastestCoder => "Fastest Coder",
            Self::StreakMaster => "Streak Master",
            Self::CodingGuru => "Coding Guru",
            Self::AlgorithmMaster => "Algorithm Master",
            Self::ProblemSolver => "Problem Solver",
            Self::ConsistentLearner => "Consistent Learner",
            Self::Top10 => "Top10",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ranked user as shown on a leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardUser {
    /// User id
    pub id: UserId,
    /// 1-based position in the source list; never rewritten by sorting
    pub rank: u32,
    /// Display name
    pub username: String,
    /// Experience points
    pub xp: u32,
    /// Distinct problems solved
    pub problems_solved: u32,
    /// Percentage in `0..=100`
    pub accuracy: u8,
    /// Movement since the last period
    pub ranking_trend: RankingTrend,
    /// Places gained or lost, when the trend is not neutral
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_change: Option<u32>,
    /// Earned badges
    pub achievements: Vec<Achievement>,
    /// Country name, when shared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Consecutive active days; missing sorts as 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

impl LeaderboardUser {
    /// Streak used for ordering; a missing streak counts as zero
    pub fn streak_or_zero(&self) -> u32 {
        self.streak.unwrap_or(0)
    }

    /// Trend marker with the rank change, e.g. "▲2", "▼1", "-"
    pub fn trend_marker(&self) -> String {
        let change = self.rank_change.map(|c| c.to_string()).unwrap_or_default();
        match self.ranking_trend {
            RankingTrend::Up => format!("▲{change}"),
            RankingTrend::Down => format!("▼{change}"),
            RankingTrend::Stable => "-".to_string(),
        }
    }
}

/// Which list a leaderboard view reads from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardScope {
    /// Everyone
    #[default]
    Global,
    /// The viewer's friends
    Friends,
}

impl FromStr for LeaderboardScope {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "friends" => Ok(Self::Friends),
            _ => Err(QueryError::UnknownLeaderboardOption(s.to_string())),
        }
    }
}

/// Period selector shown on the leaderboard.
///
/// The seeded lists carry no per-period data, so the selection is accepted
/// and echoed back but does not change which users are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFrame {
    /// Today
    Daily,
    /// This week
    Weekly,
    /// This month
    Monthly,
    /// All time
    #[default]
    AllTime,
}

impl FromStr for TimeFrame {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "all-time" | "alltime" | "all" => Ok(Self::AllTime),
            _ => Err(QueryError::UnknownLeaderboardOption(s.to_string())),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::AllTime => "all-time",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(trend: RankingTrend, change: Option<u32>, streak: Option<u32>) -> LeaderboardUser {
        LeaderboardUser {
            id: UserId::new("u1"),
            rank: 1,
            username: "CodeMaster".into(),
            xp: 15750,
            problems_solved: 342,
            accuracy: 97,
            ranking_trend: trend,
            rank_change: change,
            achievements: vec![Achievement::First100],
            country: Some("US".into()),
            streak,
        }
    }

    #[test]
    fn test_missing_streak_counts_as_zero() {
        assert_eq!(user(RankingTrend::Stable, None, None).streak_or_zero(), 0);
        assert_eq!(user(RankingTrend::Stable, None, Some(68)).streak_or_zero(), 68);
    }

    #[test]
    fn test_trend_marker() {
        assert_eq!(user(RankingTrend::Up, Some(2), None).trend_marker(), "▲2");
        assert_eq!(user(RankingTrend::Down, Some(1), None).trend_marker(), "▼1");
        assert_eq!(user(RankingTrend::Stable, None, None).trend_marker(), "-");
    }

    #[test]
    fn test_achievement_serde_names() {
        let json = serde_json::to_string(&Achievement::BestDebugger).unwrap();
        assert_eq!(json, "\"bestDebugger\"");
        let json = serde_json::to_string(&Achievement::First100).unwrap();
        assert_eq!(json, "\"first100\"");
    }

    #[test]
    fn test_time_frame_parse() {
        assert_eq!("all-time".parse::<TimeFrame>().unwrap(), TimeFrame::AllTime);
        assert_eq!("Weekly".parse::<TimeFrame>().unwrap(), TimeFrame::Weekly);
        assert!("yearly".parse::<TimeFrame>().is_err());
    }
}
