//! Services running over the seeded in-memory catalogs.

use chrono::{Duration, TimeZone, Utc};
use codearena_application::pipeline::SortState;
use codearena_application::services::{
    CommunityService, ContestListingService, ContestService, LeaderboardQuery, LeaderboardService, LeaderboardSort,
    PickerQuery, ProblemQuery, ProblemService, ProblemSort, SubmissionQuery, SubmissionService,
    SubmissionSort, ThreadQuery,
};
use codearena_application::ApplicationError;
use codearena_common::{DateWindow, SortDirection};
use codearena_domain::{
    ContestTab, Difficulty, LeaderboardScope, ProblemId, SubmissionId, SubmissionStatus, ThreadCategory,
    ThreadId, Topic, UserId,
};
use codearena_infrastructure::Catalogs;

fn catalogs() -> Catalogs {
    Catalogs::seeded().expect("seed data parses")
}

#[tokio::test]
async fn test_problem_listing_sorted_and_filtered() {
    let service = ProblemService::new(catalogs().problems);

    let all = service.list(&ProblemQuery::new()).await.unwrap();
    assert_eq!(all.len(), 20);
    assert!(all.windows(2).all(|w| w[0].popularity >= w[1].popularity));

    let hard = service
        .list(&ProblemQuery::new().difficulty(Some(Difficulty::Hard)))
        .await
        .unwrap();
    assert!(!hard.is_empty());
    assert!(hard.iter().all(|p| p.difficulty == Difficulty::Hard));

    let newest_asc = service
        .list(&ProblemQuery::new().sort(SortState::with_direction(ProblemSort::Newest, SortDirection::Asc)))
        .await
        .unwrap();
    assert!(newest_asc.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let arrays = service
        .list(&ProblemQuery::new().topics([Topic::Arrays]))
        .await
        .unwrap();
    assert!(arrays.iter().all(|p| p.topics.contains(&Topic::Arrays)));

    let lru = service.list(&ProblemQuery::new().search("lru cache")).await.unwrap();
    assert_eq!(lru.len(), 4);
}

#[tokio::test]
async fn test_problem_lookup() {
    let service = ProblemService::new(catalogs().problems);
    let problem = service.get(&ProblemId::new("problem-2")).await.unwrap();
    assert_eq!(problem.title, "Problem 2: Merge Intervals 1");

    let missing = service.get(&ProblemId::new("problem-99")).await.unwrap_err();
    assert!(matches!(missing, ApplicationError::NotFound(_)));
    assert_eq!(missing.exit_code(), 3);
}

#[tokio::test]
async fn test_leaderboard_scopes_and_sorting() {
    let service = LeaderboardService::new(catalogs().leaderboard);

    let global = service.list(&LeaderboardQuery::new()).await.unwrap();
    let ranks: Vec<u32> = global.iter().map(|u| u.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());

    let friends = service
        .list(&LeaderboardQuery::new().scope(LeaderboardScope::Friends))
        .await
        .unwrap();
    assert_eq!(friends.len(), 4);
    assert_eq!(friends[0].username, "DevBuddy");

    let by_streak = service
        .list(&LeaderboardQuery::new().sort(SortState::new(LeaderboardSort::Streak)))
        .await
        .unwrap();
    let names: Vec<&str> = by_streak.iter().take(3).map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["CodeMaster", "AlgoQueen", "ByteWizard"]);

    let searched = service
        .list(&LeaderboardQuery::new().search("code"))
        .await
        .unwrap();
    let names: Vec<&str> = searched.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["CodeMaster", "CodeNinja", "ByteCoder"]);

    let friend = service.get(&UserId::new("f2")).await.unwrap();
    assert_eq!(friend.username, "CodePal");

    let podium = service.top(3).await.unwrap();
    assert_eq!(podium.len(), 3);
    assert_eq!(podium[2].username, "AlgoQueen");
}

#[tokio::test]
async fn test_submission_history_and_stats() {
    let service = SubmissionService::new(catalogs().submissions);
    let now = Utc.with_ymd_and_hms(2023, 11, 23, 15, 0, 0).unwrap();

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.accepted, 2);
    assert_eq!(stats.acceptance_rate, 50);
    // (56 + 58 + 68) / 3, the N/A run excluded
    assert_eq!(stats.average_runtime_ms, Some(61));

    let by_runtime = service
        .list(&SubmissionQuery::new().sort(SortState::new(SubmissionSort::Runtime)), now)
        .await
        .unwrap();
    let ids: Vec<&str> = by_runtime.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["sub-3", "sub-2", "sub-1", "sub-4"]);

    let accepted = service
        .list(
            &SubmissionQuery::new()
                .status(Some(SubmissionStatus::Accepted))
                .window(DateWindow::Month),
            now,
        )
        .await
        .unwrap();
    let ids: Vec<&str> = accepted.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["sub-1", "sub-3"]);

    let comparison = service
        .compare(&SubmissionId::new("sub-2"), &SubmissionId::new("sub-1"))
        .await
        .unwrap();
    assert_eq!(comparison.runtime_delta_ms, Some(-2.0));

    let same = service
        .compare(&SubmissionId::new("sub-1"), &SubmissionId::new("sub-1"))
        .await
        .unwrap_err();
    assert!(matches!(same, ApplicationError::InvalidInput(_)));
}

#[tokio::test]
async fn test_community_threads() {
    let service = CommunityService::new(catalogs().threads);

    let algorithms = service
        .list(&ThreadQuery::new().category(ThreadCategory::Algorithms))
        .await
        .unwrap();
    let ids: Vec<&str> = algorithms.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "5"]);

    let debugging = service
        .list(&ThreadQuery::new().search("promise"))
        .await
        .unwrap();
    assert_eq!(debugging.len(), 1);
    assert_eq!(debugging[0].author.name, "Alex Rivera");

    assert!(service.get(&ThreadId::new("42")).await.is_err());
}

#[tokio::test]
async fn test_contest_pool() {
    let service = ContestService::new(catalogs().contest_pool);

    let mut builder = service.builder().await.unwrap();
    assert_eq!(builder.pool().len(), 8);
    assert!(builder.unique_topics().contains(&"Divide and Conquer".to_string()));

    let medium = service
        .pool(&PickerQuery::new().difficulty(Some(Difficulty::Medium)))
        .await
        .unwrap();
    assert_eq!(medium.len(), 3);

    assert!(builder.add(&ProblemId::new("prob-004")).unwrap());
    assert_eq!(builder.selected()[0].title, "Merge k Sorted Lists");
}

#[tokio::test]
async fn test_contest_listing_tabs() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let catalogs = Catalogs::seeded_at(now).unwrap();
    let service = ContestListingService::new(catalogs.contests);

    let upcoming = service.list(ContestTab::Upcoming, now).await.unwrap();
    let titles: Vec<_> = upcoming.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Weekly Challenge #24", "Biweekly Algorithms #12", "Beginner Friendly Contest #7"]
    );
    assert_eq!(upcoming[1].status_at(now), "Starts in 3 days");

    let previous = service.list(ContestTab::Previous, now).await.unwrap();
    assert_eq!(previous.len(), 4);
    assert_eq!(previous[0].id.as_str(), "weekly-challenge-23");
    assert_eq!(previous[3].id.as_str(), "biweekly-algorithms-11");
    assert!(previous.iter().all(|c| c.status_at(now) == "Ended"));

    // A day and a half later the first weekly challenge has finished
    let later = now + Duration::hours(36);
    let upcoming = service.list(ContestTab::Upcoming, later).await.unwrap();
    assert_eq!(upcoming.len(), 2);
    let previous = service.list(ContestTab::Previous, later).await.unwrap();
    assert_eq!(previous[0].id.as_str(), "weekly-challenge-24");
    assert_eq!(previous[0].participants_label(), "348 participants");
}
