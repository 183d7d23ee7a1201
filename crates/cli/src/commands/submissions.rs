//! Submission history commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use codearena_application::services::{
    recent_runtimes, PerformanceStats, RuntimePoint, SubmissionQuery, SubmissionService,
    SubmissionSort, RECENT_RUNTIME_POINTS,
};
use codearena_application::SortState;
use codearena_common::datetime::format_datetime_display;
use codearena_common::{DateWindow, PaginatedResult, PaginationParams};
use codearena_domain::{SubmissionId, SubmissionRecord, SubmissionStatus};
use serde::Serialize;

use crate::commands::{CommandContext, Order};
use crate::output::{colors, render, TableFormatter};

/// Width of the longest bar in the runtime chart
const CHART_WIDTH: f64 = 40.0;

#[derive(Args, Debug, Clone)]
pub struct SubmissionListArgs {
    /// Only this status ("accepted", "wrong answer", ...)
    #[arg(long)]
    pub status: Option<SubmissionStatus>,

    /// Date window (all, today, week, month)
    #[arg(long, default_value_t = DateWindow::All)]
    pub window: DateWindow,

    /// Case-insensitive match on the problem title
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key (newest, runtime, memory)
    #[arg(long, default_value_t = SubmissionSort::Newest)]
    pub sort: SubmissionSort,

    /// Sort direction; defaults to descending. `N/A` always sorts last.
    #[arg(long, value_enum)]
    pub order: Option<Order>,

    /// Evaluate the date window as of this instant (RFC 3339)
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long)]
    pub per_page: Option<u32>,
}

impl SubmissionListArgs {
    fn query(&self) -> SubmissionQuery {
        let sort = match self.order {
            Some(order) => SortState::with_direction(self.sort, order.into()),
            None => SortState::new(self.sort),
        };
        SubmissionQuery::new()
            .status(self.status)
            .window(self.window)
            .search(self.search.as_deref())
            .sort(sort)
    }
}

fn rows_table(records: &[SubmissionRecord]) -> Result<String> {
    let rows = records
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.problem_title.clone(),
                colors::status(s.status).to_string(),
                s.runtime.to_string(),
                s.memory.to_string(),
                s.language.clone(),
                format_datetime_display(&s.timestamp),
            ]
        })
        .collect();
    TableFormatter::simple(
        vec!["ID", "Problem", "Status", "Runtime", "Memory", "Language", "Submitted"],
        rows,
        "No submissions found",
    )
}

/// List submission history
pub async fn list(ctx: &CommandContext, args: &SubmissionListArgs) -> Result<String> {
    let service = SubmissionService::new(ctx.catalogs.submissions.clone());
    let now = args.as_of.unwrap_or_else(Utc::now);
    let rows = service.list(&args.query(), now).await?;

    let per_page = args.per_page.unwrap_or(ctx.config.listing.default_page_size);
    let page = PaginatedResult::paginate(rows, &PaginationParams::new(args.page, per_page));

    render(ctx.format, &page, || rows_table(&page.items))
}

/// Show one submission with its code
pub async fn show(ctx: &CommandContext, id: &str) -> Result<String> {
    let service = SubmissionService::new(ctx.catalogs.submissions.clone());
    let record = service.get(&SubmissionId::new(id)).await?;

    render(ctx.format, &record, || {
        let details = TableFormatter::key_value(vec![
            ("Problem", record.problem_title.clone()),
            ("Status", colors::status(record.status).to_string()),
            ("Runtime", record.runtime.to_string()),
            ("Memory", record.memory.to_string()),
            ("Language", record.language.clone()),
            ("Submitted", format_datetime_display(&record.timestamp)),
        ])?;
        Ok(format!("{details}\n\n{}", record.code))
    })
}

#[derive(Debug, Serialize)]
struct StatsView {
    #[serde(flatten)]
    stats: PerformanceStats,
    recent: Vec<RuntimePoint>,
}

fn bar(value: f64, max: f64) -> String {
    let width = if max > 0.0 {
        (value / max * CHART_WIDTH).round() as usize
    } else {
        0
    };
    "█".repeat(width.max(1))
}

/// Performance statistics and the recent runtime chart
pub async fn stats(ctx: &CommandContext) -> Result<String> {
    let service = SubmissionService::new(ctx.catalogs.submissions.clone());
    let stats = service.stats().await?;
    let history = service.list(&SubmissionQuery::new(), Utc::now()).await?;
    let view = StatsView {
        stats,
        recent: recent_runtimes(&history, RECENT_RUNTIME_POINTS),
    };

    render(ctx.format, &view, || {
        let stats = &view.stats;
        let summary = TableFormatter::key_value(vec![
            ("Submissions", stats.total.to_string()),
            ("Accepted", stats.accepted.to_string()),
            ("Acceptance rate", format!("{}%", stats.acceptance_rate)),
            (
                "Average runtime",
                stats
                    .average_runtime_ms
                    .map_or_else(|| "N/A".to_string(), |ms| format!("{ms}ms")),
            ),
            (
                "Average memory",
                stats
                    .average_memory_mb
                    .map_or_else(|| "N/A".to_string(), |mb| format!("{mb:.1}MB")),
            ),
        ])?;

        let max = view.recent.iter().map(|p| p.runtime_ms).fold(0.0, f64::max);
        let chart = view
            .recent
            .iter()
            .map(|p| {
                let fill = bar(p.runtime_ms, max);
                let fill = if p.status.is_accepted() {
                    colors::success(&fill)
                } else {
                    colors::error(&fill)
                };
                format!("{:<14} {fill} {}ms", p.label, p.runtime_ms)
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!("{summary}\n\n{}\n{chart}", colors::bold("Recent runtimes")))
    })
}

/// Compare two submissions side by side
pub async fn compare(ctx: &CommandContext, baseline: &str, selected: &str) -> Result<String> {
    let service = SubmissionService::new(ctx.catalogs.submissions.clone());
    let comparison = service
        .compare(&SubmissionId::new(baseline), &SubmissionId::new(selected))
        .await?;

    render(ctx.format, &comparison, || {
        let delta = |d: Option<f64>, unit: &str| match d {
            Some(d) if d < 0.0 => colors::success(&format!("{d:.1}{unit}")).to_string(),
            Some(d) if d > 0.0 => colors::error(&format!("+{d:.1}{unit}")).to_string(),
            Some(_) => format!("0{unit}"),
            None => "N/A".to_string(),
        };
        let (a, b) = (&comparison.baseline, &comparison.selected);
        let mut table = TableFormatter::new();
        table.set_header(vec!["", a.id.as_str(), b.id.as_str(), "Change"]);
        table.add_row(vec![
            "Status".to_string(),
            a.status.label().to_string(),
            b.status.label().to_string(),
            String::new(),
        ]);
        table.add_row(vec![
            "Runtime".to_string(),
            a.runtime.to_string(),
            b.runtime.to_string(),
            delta(comparison.runtime_delta_ms, "ms"),
        ]);
        table.add_row(vec![
            "Memory".to_string(),
            a.memory.to_string(),
            b.memory.to_string(),
            delta(comparison.memory_delta_mb, "MB"),
        ]);
        Ok(table.to_string())
    })
}
