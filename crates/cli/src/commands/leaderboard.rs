//! Leaderboard command

use anyhow::Result;
use clap::Args;
use codearena_application::services::{LeaderboardQuery, LeaderboardService, LeaderboardSort};
use codearena_application::SortState;
use codearena_common::format_thousands;
use codearena_domain::{LeaderboardScope, LeaderboardUser, TimeFrame};
use serde::Serialize;

use crate::commands::{CommandContext, Order};
use crate::output::{colors, render, TableFormatter};

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    /// Which list to show (global, friends)
    #[arg(long, default_value = "global")]
    pub scope: LeaderboardScope,

    /// Period label (daily, weekly, monthly, all-time)
    #[arg(long, default_value_t = TimeFrame::AllTime)]
    pub time_frame: TimeFrame,

    /// Case-insensitive username match
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key (rank, xp, problems-solved, accuracy, streak)
    #[arg(long, default_value_t = LeaderboardSort::Rank)]
    pub sort: LeaderboardSort,

    /// Sort direction; rank defaults to ascending, the rest descending
    #[arg(long, value_enum)]
    pub order: Option<Order>,

    /// Show only the top three global users
    #[arg(long, conflicts_with_all = ["scope", "search", "sort", "order"])]
    pub podium: bool,
}

impl LeaderboardArgs {
    fn query(&self) -> LeaderboardQuery {
        let sort = match self.order {
            Some(order) => SortState::with_direction(self.sort, order.into()),
            None => SortState::new(self.sort),
        };
        LeaderboardQuery::new()
            .scope(self.scope)
            .time_frame(self.time_frame)
            .search(self.search.as_deref())
            .sort(sort)
    }
}

#[derive(Debug, Serialize)]
struct LeaderboardView<'a> {
    scope: LeaderboardScope,
    time_frame: TimeFrame,
    users: &'a [LeaderboardUser],
}

fn table(users: &[LeaderboardUser]) -> Result<String> {
    let rows = users
        .iter()
        .map(|u| {
            vec![
                format!("#{}", u.rank),
                colors::trend(u.ranking_trend, &u.trend_marker()).to_string(),
                u.username.clone(),
                format_thousands(u64::from(u.xp)),
                u.problems_solved.to_string(),
                format!("{}%", u.accuracy),
                u.streak.map_or_else(|| "-".to_string(), |s| format!("{s}d")),
                u.achievements
                    .iter()
                    .map(|a| a.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();
    TableFormatter::simple(
        vec!["Rank", "Trend", "User", "XP", "Solved", "Accuracy", "Streak", "Achievements"],
        rows,
        "No users match",
    )
}

/// Show the leaderboard
pub async fn show(ctx: &CommandContext, args: &LeaderboardArgs) -> Result<String> {
    let service = LeaderboardService::new(ctx.catalogs.leaderboard.clone());

    let (scope, users) = if args.podium {
        (LeaderboardScope::Global, service.top(3).await?)
    } else {
        (args.scope, service.list(&args.query()).await?)
    };

    let view = LeaderboardView {
        scope,
        time_frame: args.time_frame,
        users: &users,
    };
    render(ctx.format, &view, || {
        let heading = match scope {
            LeaderboardScope::Global => "Global rankings",
            LeaderboardScope::Friends => "Friends rankings",
        };
        Ok(format!(
            "{} {}\n{}",
            colors::bold(heading),
            colors::dim(&format!("({})", args.time_frame)),
            table(&users)?
        ))
    })
}
