//! Community thread commands

use anyhow::Result;
use clap::Args;
use codearena_application::services::{CommunityService, ThreadQuery};
use codearena_domain::{ThreadCategory, ThreadId};

use crate::commands::CommandContext;
use crate::output::{colors, render, TableFormatter};

#[derive(Args, Debug, Clone)]
pub struct ThreadListArgs {
    /// Category (all, algorithms, questions, solutions)
    #[arg(short, long, default_value_t = ThreadCategory::All)]
    pub category: ThreadCategory,

    /// Case-insensitive match on title, content or tag names
    #[arg(short, long)]
    pub search: Option<String>,
}

/// List threads in authored order
pub async fn list(ctx: &CommandContext, args: &ThreadListArgs) -> Result<String> {
    let service = CommunityService::new(ctx.catalogs.threads.clone());
    let query = ThreadQuery::new()
        .category(args.category)
        .search(args.search.as_deref());
    let threads = service.list(&query).await?;

    render(ctx.format, &threads, || {
        let rows = threads
            .iter()
            .map(|t| {
                let title = if t.has_best_answer {
                    format!("{} {}", t.title, colors::success("✓"))
                } else {
                    t.title.clone()
                };
                vec![
                    t.id.to_string(),
                    title,
                    t.author.name.clone(),
                    t.tags.iter().map(|tag| tag.name.as_str()).collect::<Vec<_>>().join(", "),
                    t.replies.to_string(),
                    t.upvotes.to_string(),
                    t.posted.clone(),
                ]
            })
            .collect();
        TableFormatter::simple(
            vec!["ID", "Title", "Author", "Tags", "Replies", "Votes", "Posted"],
            rows,
            "No threads found",
        )
    })
}

/// Show one thread
pub async fn show(ctx: &CommandContext, id: &str) -> Result<String> {
    let service = CommunityService::new(ctx.catalogs.threads.clone());
    let thread = service.get(&ThreadId::new(id)).await?;

    render(ctx.format, &thread, || {
        Ok(format!(
            "{}\n{}\n\n{}\n\n{}",
            colors::bold(&thread.title),
            colors::dim(&format!(
                "{} ({} rep) · {} · {} replies · {} votes",
                thread.author.name,
                thread.author.reputation,
                thread.posted,
                thread.replies,
                thread.upvotes
            )),
            thread.content,
            thread
                .tags
                .iter()
                .map(|t| format!("#{}", t.name))
                .collect::<Vec<_>>()
                .join(" ")
        ))
    })
}
