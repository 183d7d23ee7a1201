//! Contest listing and drafting commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use codearena_application::services::{ContestListingService, ContestService, PickerQuery};
use codearena_common::datetime::format_datetime_display;
use codearena_domain::contest::PoolProblem;
use codearena_domain::{
    ContestDraft, ContestId, ContestSummary, ContestTab, ContestVisibility, Difficulty, ProblemId,
};
use serde::Serialize;
use tracing::info;

use crate::commands::CommandContext;
use crate::output::{colors, render, TableFormatter};

/// Listing tab as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Upcoming,
    Previous,
}

impl From<Tab> for ContestTab {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Upcoming => ContestTab::Upcoming,
            Tab::Previous => ContestTab::Previous,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ContestListArgs {
    /// Upcoming contests or ones that already started
    #[arg(short, long, value_enum, default_value_t = Tab::Upcoming)]
    pub tab: Tab,
}

#[derive(Debug, Serialize)]
struct ContestRow {
    #[serde(flatten)]
    contest: ContestSummary,
    status: String,
}

/// List scheduled contests
pub async fn list(
    ctx: &CommandContext,
    args: &ContestListArgs,
    now: DateTime<Utc>,
) -> Result<String> {
    let service = ContestListingService::new(ctx.catalogs.contests.clone());
    let rows: Vec<ContestRow> = service
        .list(args.tab.into(), now)
        .await?
        .into_iter()
        .map(|contest| ContestRow {
            status: contest.status_at(now),
            contest,
        })
        .collect();

    render(ctx.format, &rows, || {
        let table = rows
            .iter()
            .map(|row| {
                let c = &row.contest;
                vec![
                    c.id.to_string(),
                    c.title.clone(),
                    colors::difficulty(c.difficulty).to_string(),
                    format_datetime_display(&c.start),
                    row.status.clone(),
                    c.participants_label(),
                ]
            })
            .collect();
        TableFormatter::simple(
            vec!["ID", "Title", "Difficulty", "Starts", "Status", "Participants"],
            table,
            "No contests in this tab",
        )
    })
}

#[derive(Args, Debug, Clone, Default)]
pub struct PoolArgs {
    /// Case-insensitive match on the problem title
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Exact topic name, case-insensitive ("Hash Table")
    #[arg(short, long)]
    pub topic: Option<String>,

    /// List the distinct pool topics instead of problems
    #[arg(long)]
    pub topics: bool,
}

#[derive(Debug, Serialize)]
struct PoolView {
    problems: Vec<PoolProblem>,
    topics: Vec<String>,
}

fn pool_table(problems: &[PoolProblem]) -> Result<String> {
    let rows = problems
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.title.clone(),
                colors::difficulty(p.difficulty).to_string(),
                p.topics.join(", "),
            ]
        })
        .collect();
    TableFormatter::simple(
        vec!["ID", "Title", "Difficulty", "Topics"],
        rows,
        "No problems match the picker filters",
    )
}

/// Browse the contest problem pool
pub async fn pool(ctx: &CommandContext, args: &PoolArgs) -> Result<String> {
    let service = ContestService::new(ctx.catalogs.contest_pool.clone());
    let builder = service.builder().await?;

    if args.topics {
        let topics = builder.unique_topics();
        return render(ctx.format, &topics, || Ok(topics.join("\n")));
    }

    let query = PickerQuery::new()
        .search(args.search.as_deref())
        .difficulty(args.difficulty)
        .topic(args.topic.as_deref());
    let view = PoolView {
        problems: builder.picker(&query),
        topics: builder.unique_topics(),
    };
    render(ctx.format, &view, || pool_table(&view.problems))
}

/// Contest visibility as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl From<Visibility> for ContestVisibility {
    fn from(v: Visibility) -> Self {
        match v {
            Visibility::Public => ContestVisibility::Public,
            Visibility::Private => ContestVisibility::Private,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// At least 5 characters
    #[arg(long)]
    pub title: String,

    /// At least 10 characters
    #[arg(long)]
    pub description: String,

    /// Start time (RFC 3339), must be in the future
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// End time (RFC 3339), must follow the start
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,

    /// Per-participant time limit in hours (1-3)
    #[arg(long, default_value_t = 2)]
    pub time_limit: u8,

    #[arg(long, value_enum, default_value_t = Visibility::Public)]
    pub visibility: Visibility,

    #[arg(long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Allowed language (repeatable); defaults to javascript, python, java
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Pool problem id (repeatable), in contest order
    #[arg(short, long = "problem")]
    pub problems: Vec<String>,

    #[arg(long)]
    pub registration_limit: Option<u32>,

    /// Do not notify registered users
    #[arg(long)]
    pub no_notify: bool,
}

/// An accepted draft under its new id
#[derive(Debug, Serialize)]
struct AcceptedContest {
    id: ContestId,
    #[serde(flatten)]
    draft: ContestDraft,
}

/// Validate a contest draft and print the accepted form
pub async fn draft(ctx: &CommandContext, args: &DraftArgs, now: DateTime<Utc>) -> Result<String> {
    let service = ContestService::new(ctx.catalogs.contest_pool.clone());
    let mut builder = service.builder().await?;

    for id in &args.problems {
        builder.add(&ProblemId::new(id.as_str()))?;
    }

    let draft = builder.draft_mut();
    draft.title = args.title.clone();
    draft.description = args.description.clone();
    draft.start = args.start;
    draft.end = args.end;
    draft.time_limit_hours = args.time_limit;
    draft.visibility = args.visibility.into();
    draft.difficulty = args.difficulty;
    if !args.languages.is_empty() {
        draft.languages = args.languages.clone();
    }
    draft.registration_limit = args.registration_limit;
    draft.send_notifications = !args.no_notify;

    let contest = AcceptedContest {
        id: ContestId::generate(),
        draft: builder.finalize(now)?,
    };
    info!(id = %contest.id, problems = contest.draft.problems.len(), "Contest id assigned");
    let accepted = &contest.draft;

    render(ctx.format, &contest, || {
        let when = |t: Option<DateTime<Utc>>| {
            t.map_or_else(|| "-".to_string(), |t| format_datetime_display(&t))
        };
        let details = TableFormatter::key_value(vec![
            ("ID", contest.id.to_string()),
            ("Title", accepted.title.clone()),
            ("Starts", when(accepted.start)),
            ("Ends", when(accepted.end)),
            ("Time limit", format!("{}h", accepted.time_limit_hours)),
            (
                "Visibility",
                match accepted.visibility {
                    ContestVisibility::Public => "public".to_string(),
                    ContestVisibility::Private => "private".to_string(),
                },
            ),
            ("Difficulty", colors::difficulty(accepted.difficulty).to_string()),
            ("Languages", accepted.languages.join(", ")),
            (
                "Registration limit",
                accepted
                    .registration_limit
                    .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
            ),
            (
                "Notifications",
                String::from(if accepted.send_notifications { "on" } else { "off" }),
            ),
        ])?;
        Ok(format!(
            "{} {}\n{details}\n{}",
            colors::success("✓"),
            colors::bold("Contest draft accepted"),
            pool_table(builder.selected())?
        ))
    })
}
