//! Leaderboard Service
//!
//! Global and friends rankings with username search and re-sorting. Sorting
//! never rewrites a user's stored rank.

use crate::pipeline::{self, text_search, Predicates, SortField, SortKey, SortState};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use codearena_common::{QueryText, SortDirection};
use codearena_domain::errors::{CatalogError, QueryError};
use codearena_domain::{LeaderboardScope, LeaderboardUser, TimeFrame, UserId};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read-only leaderboard source, one list per scope
#[async_trait]
pub trait LeaderboardCatalog: Send + Sync {
    async fn list(&self, scope: LeaderboardScope) -> ApplicationResult<Vec<LeaderboardUser>>;
    async fn get_by_id(&self, id: &UserId) -> ApplicationResult<Option<LeaderboardUser>>;
}

/// Leaderboard sort keys. Rank starts ascending, the rest descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LeaderboardSort {
    #[default]
    Rank,
    Xp,
    ProblemsSolved,
    Accuracy,
    Streak,
}

impl LeaderboardSort {
    pub const ALL: [LeaderboardSort; 5] = [
        Self::Rank,
        Self::Xp,
        Self::ProblemsSolved,
        Self::Accuracy,
        Self::Streak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Xp => "xp",
            Self::ProblemsSolved => "problems-solved",
            Self::Accuracy => "accuracy",
            Self::Streak => "streak",
        }
    }
}

impl SortField for LeaderboardSort {
    fn default_direction(self) -> SortDirection {
        match self {
            Self::Rank => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

impl SortKey<LeaderboardUser> for LeaderboardSort {
    fn ascending(self, a: &LeaderboardUser, b: &LeaderboardUser) -> Ordering {
        match self {
            Self::Rank => a.rank.cmp(&b.rank),
            Self::Xp => a.xp.cmp(&b.xp),
            Self::ProblemsSolved => a.problems_solved.cmp(&b.problems_solved),
            Self::Accuracy => a.accuracy.cmp(&b.accuracy),
            Self::Streak => a.streak_or_zero().cmp(&b.streak_or_zero()),
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "xp" => Ok(Self::Xp),
            "problems-solved" | "solved" => Ok(Self::ProblemsSolved),
            "accuracy" => Ok(Self::Accuracy),
            "streak" => Ok(Self::Streak),
            _ => Err(QueryError::UnknownSortKey {
                value: s.to_string(),
                allowed: "rank, xp, problems-solved, accuracy, streak",
            }),
        }
    }
}

/// Selections of the leaderboard screen.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    pub scope: LeaderboardScope,
    /// Shown in the header; the rankings carry no per-period data so it
    /// does not change the rows.
    pub time_frame: TimeFrame,
    pub text: QueryText,
    pub sort: SortState<LeaderboardSort>,
}

impl LeaderboardQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: LeaderboardScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn time_frame(mut self, time_frame: TimeFrame) -> Self {
        self.time_frame = time_frame;
        self
    }

    pub fn search(mut self, text: impl Into<QueryText>) -> Self {
        self.text = text.into();
        self
    }

    pub fn sort(mut self, sort: SortState<LeaderboardSort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn predicates(&self) -> Predicates<'static, LeaderboardUser> {
        Predicates::new().with(text_search(self.text.clone(), |u: &LeaderboardUser| {
            vec![u.username.as_str()]
        }))
    }

    pub fn apply(&self, source: &[LeaderboardUser]) -> Vec<LeaderboardUser> {
        pipeline::apply(source, &self.predicates(), &self.sort)
    }
}

/// Leaderboard service implementation
pub struct LeaderboardService<C: LeaderboardCatalog> {
    catalog: Arc<C>,
}

impl<C: LeaderboardCatalog> LeaderboardService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Rows for the selected scope
    #[instrument(skip(self, query), fields(scope = ?query.scope, time_frame = %query.time_frame, sort = %query.sort.key))]
    pub async fn list(&self, query: &LeaderboardQuery) -> ApplicationResult<Vec<LeaderboardUser>> {
        let source = self.catalog.list(query.scope).await?;
        let rows = query.apply(&source);
        debug!(total = source.len(), shown = rows.len(), "Leaderboard filtered");
        Ok(rows)
    }

    /// Get one ranked user from either list
    #[instrument(skip(self))]
    pub async fn get(&self, id: &UserId) -> ApplicationResult<LeaderboardUser> {
        self.catalog
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::from(CatalogError::UserNotFound(id.clone())))
    }

    /// The `n` highest-ranked global users, for the podium
    #[instrument(skip(self))]
    pub async fn top(&self, n: usize) -> ApplicationResult<Vec<LeaderboardUser>> {
        let mut users = self.catalog.list(LeaderboardScope::Global).await?;
        users.sort_by_key(|u| u.rank);
        users.truncate(n);
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codearena_testing::builders::LeaderboardUserBuilder;

    fn ids(rows: &[LeaderboardUser]) -> Vec<&str> {
        rows.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn test_rank_ascending() {
        let source = vec![
            LeaderboardUserBuilder::new().id("x").rank(3).build(),
            LeaderboardUserBuilder::new().id("y").rank(1).build(),
            LeaderboardUserBuilder::new().id("z").rank(2).build(),
        ];
        let rows = LeaderboardQuery::new().apply(&source);
        assert_eq!(ids(&rows), vec!["y", "z", "x"]);
    }

    #[test]
    fn test_streak_missing_sorts_as_zero() {
        let source = vec![
            LeaderboardUserBuilder::new().id("none").rank(1).streak(None).build(),
            LeaderboardUserBuilder::new().id("five").rank(2).streak(Some(5)).build(),
            LeaderboardUserBuilder::new().id("zero").rank(3).streak(Some(0)).build(),
        ];
        let query = LeaderboardQuery::new().sort(SortState::new(LeaderboardSort::Streak));
        assert_eq!(ids(&query.apply(&source)), vec!["five", "none", "zero"]);
    }

    #[test]
    fn test_sorting_keeps_stored_rank() {
        let source = vec![
            LeaderboardUserBuilder::new().id("a").rank(1).xp(100).build(),
            LeaderboardUserBuilder::new().id("b").rank(2).xp(900).build(),
        ];
        let rows = LeaderboardQuery::new()
            .sort(SortState::new(LeaderboardSort::Xp))
            .apply(&source);
        assert_eq!(ids(&rows), vec!["b", "a"]);
        assert_eq!(rows[0].rank, 2);
    }

    #[test]
    fn test_time_frame_does_not_filter() {
        let source = vec![
            LeaderboardUserBuilder::new().id("a").rank(1).username("CodeMaster").build(),
            LeaderboardUserBuilder::new().id("b").rank(2).username("ByteWizard").build(),
        ];
        let all_time = LeaderboardQuery::new().apply(&source);
        let daily = LeaderboardQuery::new().time_frame(TimeFrame::Daily).apply(&source);
        assert_eq!(all_time, daily);

        let searched = LeaderboardQuery::new().search("wiz").apply(&source);
        assert_eq!(ids(&searched), vec!["b"]);
    }
}
