//! Leaderboard catalog with separate global and friends lists.

use async_trait::async_trait;
use codearena_application::services::LeaderboardCatalog;
use codearena_application::ApplicationResult;
use codearena_domain::{LeaderboardScope, LeaderboardUser, UserId};
use tracing::{debug, instrument};

use super::{InMemoryCatalog, Keyed};
use crate::{seed, Result};

impl Keyed for LeaderboardUser {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Both ranking sources. Ranks are stored per list and are not dense
/// across lists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    global: InMemoryCatalog<LeaderboardUser>,
    friends: InMemoryCatalog<LeaderboardUser>,
}

impl InMemoryLeaderboard {
    pub fn new(
        global: impl IntoIterator<Item = LeaderboardUser>,
        friends: impl IntoIterator<Item = LeaderboardUser>,
    ) -> Self {
        Self {
            global: InMemoryCatalog::new(global),
            friends: InMemoryCatalog::new(friends),
        }
    }

    pub fn seeded() -> Result<Self> {
        let (global, friends) = seed::leaderboards()?;
        Ok(Self::new(global, friends))
    }

    fn source(&self, scope: LeaderboardScope) -> &InMemoryCatalog<LeaderboardUser> {
        match scope {
            LeaderboardScope::Global => &self.global,
            LeaderboardScope::Friends => &self.friends,
        }
    }
}

#[async_trait]
impl LeaderboardCatalog for InMemoryLeaderboard {
    #[instrument(skip(self))]
    async fn list(&self, scope: LeaderboardScope) -> ApplicationResult<Vec<LeaderboardUser>> {
        let source = self.source(scope);
        debug!(count = source.len(), "Listing leaderboard");
        Ok(source.all())
    }

    /// Global list first, then friends
    async fn get_by_id(&self, id: &UserId) -> ApplicationResult<Option<LeaderboardUser>> {
        Ok(self
            .global
            .find(id.as_str())
            .or_else(|| self.friends.find(id.as_str())))
    }
}
