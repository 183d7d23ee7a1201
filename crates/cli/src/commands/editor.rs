//! Code editor commands: syntax feedback and simulated runs

use anyhow::{bail, Context, Result};
use clap::Args;
use codearena_application::services::SubmissionService;
use codearena_application::{CodeRunner, EditorSession, Hint, HintKind};
use codearena_domain::SubmissionId;
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::CommandContext;
use crate::output::{colors, render};
use crate::progress;

/// Where the code comes from. Exactly one source is required.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read the buffer from a file
    #[arg(short, long, conflicts_with_all = ["code", "submission"])]
    pub file: Option<PathBuf>,

    /// Use this text as the buffer
    #[arg(short, long, conflicts_with = "submission")]
    pub code: Option<String>,

    /// Load code and language from a past submission
    #[arg(long)]
    pub submission: Option<String>,

    /// Editor language; defaults to the configured one
    #[arg(short, long)]
    pub language: Option<String>,
}

impl SourceArgs {
    /// Build a session holding the requested buffer
    async fn session(&self, ctx: &CommandContext) -> Result<EditorSession> {
        let mut session = EditorSession::from_config(&ctx.config.editor, ctx.feedback.clone());

        if let Some(id) = &self.submission {
            let service = SubmissionService::new(ctx.catalogs.submissions.clone());
            let record = service.get(&SubmissionId::new(id.as_str())).await?;
            session.load_submission(&record);
        } else if let Some(path) = &self.file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            session.edit(text);
        } else if let Some(code) = &self.code {
            session.edit(code.as_str());
        } else {
            bail!("Provide --file, --code or --submission");
        }

        if let Some(language) = &self.language {
            session.set_language(language.as_str());
        }
        Ok(session)
    }
}

#[derive(Debug, Serialize)]
struct CheckView {
    language: String,
    lines: usize,
    hints: Vec<Hint>,
}

fn paint(hint: &Hint) -> String {
    match hint.kind {
        HintKind::SyntaxError => colors::error(&hint.text).to_string(),
        HintKind::Fix | HintKind::Optimization => colors::warning(&hint.text).to_string(),
        HintKind::Tip | HintKind::Hint => colors::success(&hint.text).to_string(),
        HintKind::Note => colors::dim(&hint.text).to_string(),
    }
}

/// Run the feedback heuristic over a buffer
pub async fn check(ctx: &CommandContext, args: &SourceArgs) -> Result<String> {
    let mut session = args.session(ctx).await?;
    let hints = session.evaluate_now();
    let view = CheckView {
        language: session.language().to_string(),
        lines: *session.line_numbers().end(),
        hints,
    };

    render(ctx.format, &view, || {
        let header = colors::dim(&format!("{} · {} lines", view.language, view.lines));
        if view.hints.is_empty() {
            return Ok(format!("{header}\n{}", colors::success("No issues found")));
        }
        let body = view.hints.iter().map(paint).collect::<Vec<_>>().join("\n");
        Ok(format!("{header}\n{body}"))
    })
}

/// Simulated run of a buffer
pub async fn run(ctx: &CommandContext, args: &SourceArgs) -> Result<String> {
    let session = args.session(ctx).await?;
    let runner = CodeRunner::from_config(&ctx.config.editor);

    let spinner = progress::spinner("Running code...");
    let outcome = runner.run(session.buffer()).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    render(ctx.format, &outcome, || Ok(outcome.output.clone()))
}
