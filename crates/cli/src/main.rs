//! CodeArena CLI
//!
//! Browse problems, rankings and submissions, check code and step through
//! algorithm walkthroughs from the terminal.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use codearena_application::ApplicationError;
use codearena_common::{init_tracing, AppConfig};
use codearena_domain::errors::{ErrorDetail, ErrorResponse};

use codearena_cli::commands::{
    community, contest, editor, leaderboard, problems, submissions, visualize, CommandContext,
};
use codearena_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "codearena")]
#[command(author, version, about = "CodeArena coding practice CLI")]
#[command(long_about = "Command-line front end for the CodeArena practice platform.\n\n\
    Browse problems and rankings, review your submissions, check code and\n\
    step through algorithm visualizations.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List practice problems
    #[command(alias = "p")]
    Problems(problems::ProblemListArgs),

    /// Show one problem
    Problem {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Show the leaderboard
    #[command(alias = "lb")]
    Leaderboard(leaderboard::LeaderboardArgs),

    /// List submission history
    #[command(alias = "subs")]
    Submissions(submissions::SubmissionListArgs),

    /// Show one submission with its code
    Submission {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Performance statistics over all submissions
    Stats,

    /// Compare two submissions
    Compare {
        /// Baseline submission
        #[arg(value_name = "BASELINE")]
        baseline: String,

        /// Submission compared against the baseline
        #[arg(value_name = "SELECTED")]
        selected: String,
    },

    /// List community threads
    Threads(community::ThreadListArgs),

    /// Show one community thread
    Thread {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Syntax feedback for a code buffer
    Check(editor::SourceArgs),

    /// Simulated code run
    Run(editor::SourceArgs),

    /// Step through an algorithm visualization
    #[command(alias = "viz")]
    Visualize(visualize::VisualizeArgs),

    /// List upcoming or previous contests
    Contests(contest::ContestListArgs),

    /// Browse the contest problem pool
    ContestPool(contest::PoolArgs),

    /// Validate a contest draft
    Contest(contest::DraftArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "codearena", &mut std::io::stdout());
}

async fn execute(ctx: &CommandContext, command: Commands) -> Result<String> {
    match command {
        Commands::Problems(args) => problems::list(ctx, &args).await,
        Commands::Problem { id } => problems::show(ctx, &id).await,
        Commands::Leaderboard(args) => leaderboard::show(ctx, &args).await,
        Commands::Submissions(args) => submissions::list(ctx, &args).await,
        Commands::Submission { id } => submissions::show(ctx, &id).await,
        Commands::Stats => submissions::stats(ctx).await,
        Commands::Compare { baseline, selected } => {
            submissions::compare(ctx, &baseline, &selected).await
        }
        Commands::Threads(args) => community::list(ctx, &args).await,
        Commands::Thread { id } => community::show(ctx, &id).await,
        Commands::Check(args) => editor::check(ctx, &args).await,
        Commands::Run(args) => editor::run(ctx, &args).await,
        Commands::Visualize(args) => visualize::visualize(ctx, &args).await,
        Commands::Contests(args) => contest::list(ctx, &args, ctx.now).await,
        Commands::ContestPool(args) => contest::pool(ctx, &args).await,
        Commands::Contest(args) => contest::draft(ctx, &args, Utc::now()).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(String::new())
        }
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ApplicationError>()
        .map_or(1, ApplicationError::exit_code)
}

fn error_response(err: &anyhow::Error) -> ErrorResponse {
    ErrorResponse {
        error: ErrorDetail {
            code: err
                .downcast_ref::<ApplicationError>()
                .map_or("INTERNAL_ERROR", ApplicationError::error_code)
                .to_string(),
            message: err.to_string(),
        },
        timestamp: Utc::now(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    config.telemetry.log_level = if cli.verbose { "debug" } else { "warn" }.to_string();
    init_tracing(&config.telemetry)?;

    let ctx = CommandContext::new(config, cli.format)?;

    match execute(&ctx, cli.command).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) if cli.format == OutputFormat::Json => {
            eprintln!("{}", serde_json::to_string_pretty(&error_response(&e))?);
            std::process::exit(exit_code(&e));
        }
        Err(e) => {
            use colored::Colorize;
            eprintln!("{} {}", "Error:".red().bold(), e);
            if cli.verbose {
                eprintln!("\n{}", "Backtrace:".dimmed());
                eprintln!("{:?}", e);
            }
            std::process::exit(exit_code(&e));
        }
    }
}
