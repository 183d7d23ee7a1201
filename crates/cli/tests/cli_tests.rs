//! Command tests against the seeded catalogs.

use chrono::{Duration, TimeZone, Utc};
use codearena_application::services::{LeaderboardSort, ProblemSort, SubmissionSort};
use codearena_application::visualizer::builtin_script;
use codearena_application::ApplicationError;
use codearena_cli::commands::community::ThreadListArgs;
use codearena_cli::commands::contest::{ContestListArgs, DraftArgs, PoolArgs, Tab, Visibility};
use codearena_cli::commands::editor::SourceArgs;
use codearena_cli::commands::leaderboard::LeaderboardArgs;
use codearena_cli::commands::problems::ProblemListArgs;
use codearena_cli::commands::submissions::SubmissionListArgs;
use codearena_cli::commands::visualize::VisualizeArgs;
use codearena_cli::commands::{
    community, contest, editor, leaderboard, problems, submissions, visualize, CommandContext,
};
use codearena_cli::OutputFormat;
use codearena_common::{AppConfig, DateWindow};
use codearena_domain::{Difficulty, LeaderboardScope, SubmissionStatus, ThreadCategory, TimeFrame};
use serde_json::Value;

fn ctx(format: OutputFormat) -> CommandContext {
    CommandContext::new(AppConfig::default(), format).unwrap()
}

fn json(output: &str) -> Value {
    serde_json::from_str(output).unwrap()
}

fn exit_code(err: &anyhow::Error) -> Option<i32> {
    err.downcast_ref::<ApplicationError>().map(ApplicationError::exit_code)
}

fn draft_args(now: chrono::DateTime<Utc>) -> DraftArgs {
    DraftArgs {
        title: "Weekly Sprint".to_string(),
        description: "Four problems in two hours".to_string(),
        start: Some(now + Duration::days(1)),
        end: Some(now + Duration::days(1) + Duration::hours(2)),
        time_limit: 2,
        visibility: Visibility::Private,
        difficulty: Difficulty::Medium,
        languages: vec![],
        problems: vec!["prob-001".to_string(), "prob-004".to_string()],
        registration_limit: Some(100),
        no_notify: true,
    }
}

#[tokio::test]
async fn test_problem_list_pages_in_popularity_order() {
    let ctx = ctx(OutputFormat::Json);
    let args = ProblemListArgs {
        sort: ProblemSort::Popularity,
        page: 1,
        per_page: Some(5),
        ..Default::default()
    };

    let page = json(&problems::list(&ctx, &args).await.unwrap());
    assert_eq!(page["total"], 20);
    assert_eq!(page["items"].as_array().unwrap().len(), 5);

    let popularity: Vec<u64> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["popularity"].as_u64().unwrap())
        .collect();
    assert!(popularity.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_problem_list_filters_by_difficulty() {
    let ctx = ctx(OutputFormat::Json);
    let args = ProblemListArgs {
        difficulty: Some(Difficulty::Hard),
        page: 1,
        per_page: Some(50),
        ..Default::default()
    };

    let page = json(&problems::list(&ctx, &args).await.unwrap());
    for item in page["items"].as_array().unwrap() {
        assert_eq!(item["difficulty"], "hard");
    }
}

#[tokio::test]
async fn test_unknown_problem_maps_to_not_found() {
    let ctx = ctx(OutputFormat::Table);
    let err = problems::show(&ctx, "problem-99").await.unwrap_err();
    assert_eq!(exit_code(&err), Some(3));
}

#[tokio::test]
async fn test_friends_leaderboard() {
    let ctx = ctx(OutputFormat::Json);
    let args = LeaderboardArgs {
        scope: LeaderboardScope::Friends,
        time_frame: TimeFrame::Weekly,
        search: None,
        sort: LeaderboardSort::Rank,
        order: None,
        podium: false,
    };

    let view = json(&leaderboard::show(&ctx, &args).await.unwrap());
    assert_eq!(view["scope"], "friends");
    assert_eq!(view["users"].as_array().unwrap().len(), 4);
    assert_eq!(view["users"][0]["username"], "DevBuddy");
}

#[tokio::test]
async fn test_podium_shows_top_three() {
    let ctx = ctx(OutputFormat::Json);
    let args = LeaderboardArgs {
        scope: LeaderboardScope::Global,
        time_frame: TimeFrame::AllTime,
        search: None,
        sort: LeaderboardSort::Rank,
        order: None,
        podium: true,
    };

    let view = json(&leaderboard::show(&ctx, &args).await.unwrap());
    let ranks: Vec<u64> = view["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["rank"].as_u64().unwrap())
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_accepted_submissions_this_month() {
    let ctx = ctx(OutputFormat::Json);
    let args = SubmissionListArgs {
        status: Some(SubmissionStatus::Accepted),
        window: DateWindow::Month,
        search: None,
        sort: SubmissionSort::Newest,
        order: None,
        as_of: Some(Utc.with_ymd_and_hms(2023, 11, 23, 15, 0, 0).unwrap()),
        page: 1,
        per_page: None,
    };

    let page = json(&submissions::list(&ctx, &args).await.unwrap());
    let ids: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sub-1", "sub-3"]);
}

#[tokio::test]
async fn test_stats_reports_acceptance_rate() {
    let ctx = ctx(OutputFormat::Json);
    let view = json(&submissions::stats(&ctx).await.unwrap());

    assert_eq!(view["total"], 4);
    assert_eq!(view["acceptance_rate"], 50);
    assert_eq!(view["average_runtime_ms"], 61);
    assert!(!view["recent"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_compare_same_submission_is_invalid() {
    let ctx = ctx(OutputFormat::Json);
    let err = submissions::compare(&ctx, "sub-1", "sub-1").await.unwrap_err();
    assert_eq!(exit_code(&err), Some(2));

    let err = submissions::show(&ctx, "sub-42").await.unwrap_err();
    assert_eq!(exit_code(&err), Some(3));
}

#[tokio::test]
async fn test_thread_category_filter() {
    let ctx = ctx(OutputFormat::Json);
    let args = ThreadListArgs {
        category: ThreadCategory::Algorithms,
        search: None,
    };

    let threads = json(&community::list(&ctx, &args).await.unwrap());
    let ids: Vec<&str> = threads
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "5"]);
}

#[tokio::test]
async fn test_contest_tabs() {
    let ctx = ctx(OutputFormat::Json);
    let now = ctx.now;

    let upcoming = json(&contest::list(&ctx, &ContestListArgs::default(), now).await.unwrap());
    let upcoming = upcoming.as_array().unwrap();
    assert_eq!(upcoming.len(), 3);
    assert_eq!(upcoming[0]["id"].as_str(), Some("weekly-challenge-24"));
    assert_eq!(upcoming[0]["status"].as_str(), Some("Starts in 1 day"));

    let args = ContestListArgs { tab: Tab::Previous };
    let previous = json(&contest::list(&ctx, &args, now).await.unwrap());
    let previous = previous.as_array().unwrap();
    assert_eq!(previous.len(), 4);
    assert!(previous.iter().all(|c| c["status"].as_str() == Some("Ended")));

    let table_ctx = self::ctx(OutputFormat::Table);
    let table = contest::list(&table_ctx, &args, table_ctx.now).await.unwrap();
    assert!(table.contains("Database Systems Contest #5"));
    assert!(table.contains("187 participants"));
}

#[tokio::test]
async fn test_contest_pool_topics() {
    let ctx = ctx(OutputFormat::Json);
    let args = PoolArgs {
        topics: true,
        ..Default::default()
    };

    let topics = json(&contest::pool(&ctx, &args).await.unwrap());
    assert!(topics
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t.as_str() == Some("Divide and Conquer")));
}

#[tokio::test]
async fn test_contest_draft_accepted() {
    let ctx = ctx(OutputFormat::Json);
    let now = Utc::now();

    let draft = json(&contest::draft(&ctx, &draft_args(now), now).await.unwrap());
    assert_eq!(draft["visibility"], "private");
    assert_eq!(draft["problems"], serde_json::json!(["prob-001", "prob-004"]));
    assert_eq!(draft["send_notifications"], false);
    assert_eq!(draft["languages"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_contest_draft_rejections() {
    let ctx = ctx(OutputFormat::Json);
    let now = Utc::now();

    let mut args = draft_args(now);
    args.title = "Cup".to_string();
    let err = contest::draft(&ctx, &args, now).await.unwrap_err();
    assert_eq!(exit_code(&err), Some(2));
    assert!(err.to_string().contains("Title must be at least 5 characters"));

    let mut args = draft_args(now);
    args.problems = vec!["prob-999".to_string()];
    let err = contest::draft(&ctx, &args, now).await.unwrap_err();
    assert_eq!(exit_code(&err), Some(3));
}

#[tokio::test]
async fn test_check_reports_hints() {
    let ctx = ctx(OutputFormat::Json);
    let args = SourceArgs {
        code: Some("function f( {".to_string()),
        ..Default::default()
    };

    let view = json(&editor::check(&ctx, &args).await.unwrap());
    assert_eq!(view["language"], "javascript");
    assert_eq!(view["hints"][0]["kind"], "syntax_error");
}

#[tokio::test]
async fn test_check_requires_a_source() {
    let ctx = ctx(OutputFormat::Json);
    let err = editor::check(&ctx, &SourceArgs::default()).await.unwrap_err();
    assert!(err.to_string().contains("--code"));
}

#[tokio::test(start_paused = true)]
async fn test_run_returns_simulated_output() {
    let ctx = ctx(OutputFormat::Json);
    let args = SourceArgs {
        submission: Some("sub-1".to_string()),
        ..Default::default()
    };

    let outcome = json(&editor::run(&ctx, &args).await.unwrap());
    assert!(outcome["output"]
        .as_str()
        .unwrap()
        .starts_with("Code executed successfully!"));
}

#[tokio::test]
async fn test_visualize_instant_prints_every_step() {
    let ctx = ctx(OutputFormat::Json);
    let args = VisualizeArgs {
        script: Some("two-sum".to_string()),
        instant: true,
        ..Default::default()
    };

    let steps = json(&visualize::visualize(&ctx, &args).await.unwrap());
    let expected = builtin_script("two-sum").unwrap();
    assert_eq!(steps.as_array().unwrap().len(), expected.len());
    assert_eq!(steps[0]["description"], expected[0].description.as_str());
}

#[tokio::test(start_paused = true)]
async fn test_visualize_playback_reaches_last_step() {
    let ctx = ctx(OutputFormat::Json);
    let args = VisualizeArgs {
        script: Some("bfs".to_string()),
        speed: Some(100),
        ..Default::default()
    };

    let steps = json(&visualize::visualize(&ctx, &args).await.unwrap());
    let indices: Vec<u64> = steps
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["index"].as_u64().unwrap())
        .collect();
    let total = builtin_script("bfs").unwrap().len() as u64;
    assert_eq!(indices, (0..total).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_unknown_script_lists_available() {
    let ctx = ctx(OutputFormat::Table);
    let args = VisualizeArgs {
        script: Some("quicksort".to_string()),
        ..Default::default()
    };

    let err = visualize::visualize(&ctx, &args).await.unwrap_err();
    assert!(err.to_string().contains("two-sum"));
}
