//! Problem list and detail commands

use anyhow::Result;
use clap::Args;
use codearena_application::services::{ProblemQuery, ProblemService, ProblemSort};
use codearena_application::SortState;
use codearena_common::{format_thousands, PaginatedResult, PaginationParams};
use codearena_domain::{Difficulty, Problem, ProblemId, Topic};
use serde::Serialize;

use crate::commands::{CommandContext, Order};
use crate::output::{colors, render, TableFormatter};

#[derive(Args, Debug, Clone, Default)]
pub struct ProblemListArgs {
    /// Only this difficulty (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Keep problems tagged with any of these topics (repeatable)
    #[arg(short, long = "topic")]
    pub topics: Vec<Topic>,

    /// Case-insensitive match on title or topic name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key (popularity, newest, most-attempted)
    #[arg(long, default_value_t = ProblemSort::Popularity)]
    pub sort: ProblemSort,

    /// Sort direction; defaults to descending
    #[arg(long, value_enum)]
    pub order: Option<Order>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page; defaults to the configured page size
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl ProblemListArgs {
    fn query(&self) -> ProblemQuery {
        let sort = match self.order {
            Some(order) => SortState::with_direction(self.sort, order.into()),
            None => SortState::new(self.sort),
        };
        ProblemQuery::new()
            .difficulty(self.difficulty)
            .topics(self.topics.iter().copied())
            .search(self.search.as_deref())
            .sort(sort)
    }
}

/// One row of the problem table
#[derive(Debug, Serialize)]
pub struct ProblemRow {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub topics: Vec<&'static str>,
    pub success_rate: u8,
    pub attempts: u32,
    pub popularity: u32,
    pub is_new: bool,
}

impl From<&Problem> for ProblemRow {
    fn from(p: &Problem) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            difficulty: p.difficulty,
            topics: p.topic_names().collect(),
            success_rate: p.success_rate,
            attempts: p.attempt_count,
            popularity: p.popularity,
            is_new: p.is_new,
        }
    }
}

/// List problems
pub async fn list(ctx: &CommandContext, args: &ProblemListArgs) -> Result<String> {
    let service = ProblemService::new(ctx.catalogs.problems.clone());
    let rows = service.list(&args.query()).await?;

    let per_page = args.per_page.unwrap_or(ctx.config.listing.default_page_size);
    let page = PaginatedResult::paginate(rows, &PaginationParams::new(args.page, per_page))
        .map(|p| ProblemRow::from(&p));

    render(ctx.format, &page, || {
        let rows = page
            .items
            .iter()
            .map(|r| {
                let title = if r.is_new {
                    format!("{} {}", r.title, colors::success("NEW"))
                } else {
                    r.title.clone()
                };
                vec![
                    r.id.clone(),
                    title,
                    colors::difficulty(r.difficulty).to_string(),
                    r.topics.join(", "),
                    format!("{}%", r.success_rate),
                    format_thousands(u64::from(r.attempts)),
                    r.popularity.to_string(),
                ]
            })
            .collect();
        let table = TableFormatter::simple(
            vec!["ID", "Title", "Difficulty", "Topics", "Success", "Attempts", "Popularity"],
            rows,
            "No problems found",
        )?;
        Ok(format!(
            "{table}\n{}",
            colors::dim(&format!(
                "Page {}/{} ({} problems)",
                page.page,
                page.total_pages.max(1),
                page.total
            ))
        ))
    })
}

/// Show one problem
pub async fn show(ctx: &CommandContext, id: &str) -> Result<String> {
    let service = ProblemService::new(ctx.catalogs.problems.clone());
    let problem = service.get(&ProblemId::new(id)).await?;

    render(ctx.format, &problem, || {
        let mut out = TableFormatter::key_value(vec![
            ("Title", problem.title.clone()),
            ("Difficulty", colors::difficulty(problem.difficulty).to_string()),
            ("Topics", problem.topic_names().collect::<Vec<_>>().join(", ")),
            ("Success rate", format!("{}%", problem.success_rate)),
            ("Attempts", format_thousands(u64::from(problem.attempt_count))),
        ])?;

        out.push_str(&format!("\n\n{}\n", problem.description));
        for (i, example) in problem.examples.iter().enumerate() {
            out.push_str(&format!(
                "\n{}\n  Input: {}\n  Output: {}\n",
                colors::bold(&format!("Example {}", i + 1)),
                example.input,
                example.output
            ));
            if let Some(explanation) = &example.explanation {
                out.push_str(&format!("  Explanation: {explanation}\n"));
            }
        }
        if !problem.constraints.is_empty() {
            out.push_str(&format!("\n{}\n", colors::bold("Constraints")));
            for constraint in &problem.constraints {
                out.push_str(&format!("  - {constraint}\n"));
            }
        }
        Ok(out)
    })
}
