//! Test fixtures for generating domain records with realistic data.
//!
//! Values come from `fake`, so two calls give different records. Use the
//! builders when a test needs fixed values.

use chrono::Duration;
use codearena_domain::community::ThreadAuthor;
use codearena_domain::contest::PoolProblem;
use codearena_domain::problem::ProblemExample;
use codearena_domain::{
    Difficulty, DiscussionThread, LeaderboardUser, Measurement, Problem, ProblemId, RankingTrend,
    SubmissionId, SubmissionRecord, SubmissionStatus, TagKind, ThreadId, ThreadTag, Topic, UserId,
};
use fake::{
    faker::{
        internet::en::Username,
        lorem::en::{Paragraph, Sentence, Words},
        name::en::Name,
    },
    Fake,
};

use crate::builders::reference_time;

fn pick<T: Copy>(values: &[T]) -> T {
    values[(0..values.len()).fake::<usize>()]
}

fn title_case(words: Vec<String>) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a practice problem with random metrics
pub fn create_test_problem(n: usize) -> Problem {
    let topic_count = (1..4).fake::<usize>();
    Problem {
        id: ProblemId::new(format!("problem-{n}")),
        title: format!("Problem {n}: {}", title_case(Words(2..4).fake())),
        difficulty: pick(&Difficulty::ALL),
        topics: (0..topic_count).map(|_| pick(&Topic::ALL)).collect(),
        popularity: (0..1000).fake(),
        success_rate: (0..100).fake(),
        attempt_count: (0..5000).fake(),
        is_new: (0..4).fake::<u8>() == 0,
        created_at: reference_time() - Duration::days((0..30).fake::<i64>()),
        description: Paragraph(1..3).fake(),
        examples: vec![ProblemExample {
            input: "nums = [1,2,3]".to_string(),
            output: "6".to_string(),
            explanation: Some(Sentence(4..8).fake()),
        }],
        constraints: vec!["1 <= nums.length <= 10^4".to_string()],
        test_cases: vec![],
    }
}

/// Create `count` problems with ids `problem-1..=count`
pub fn create_test_problems(count: usize) -> Vec<Problem> {
    (1..=count).map(create_test_problem).collect()
}

/// Create a ranked user at `rank`
pub fn create_test_leaderboard_user(rank: u32) -> LeaderboardUser {
    let trend = pick(&[RankingTrend::Up, RankingTrend::Down, RankingTrend::Stable]);
    LeaderboardUser {
        id: UserId::new(format!("u{rank}")),
        rank,
        username: Username().fake(),
        xp: (1000..20000).fake(),
        problems_solved: (10..400).fake(),
        accuracy: (50..100).fake(),
        ranking_trend: trend,
        rank_change: match trend {
            RankingTrend::Stable => None,
            _ => Some((1..5).fake()),
        },
        achievements: vec![],
        country: Some("US".to_string()),
        streak: if (0..3).fake::<u8>() == 0 {
            None
        } else {
            Some((0..70).fake())
        },
    }
}

/// Create a leaderboard with ranks `1..=count`
pub fn create_test_leaderboard(count: u32) -> Vec<LeaderboardUser> {
    (1..=count).map(create_test_leaderboard_user).collect()
}

/// Create a submission with a random status; failed runs that never
/// finished carry `N/A` measurements.
pub fn create_test_submission(n: usize) -> SubmissionRecord {
    let status = pick(&SubmissionStatus::ALL);
    let measured = !matches!(
        status,
        SubmissionStatus::TimeLimitExceeded | SubmissionStatus::CompilationError
    );
    let (runtime, memory) = if measured {
        (
            Measurement::Millis((30..200).fake::<u32>() as f64),
            Measurement::Megabytes((300..600).fake::<u32>() as f64 / 10.0),
        )
    } else {
        (Measurement::NotAvailable, Measurement::NotAvailable)
    };

    SubmissionRecord {
        id: SubmissionId::new(format!("sub-{n}")),
        problem_id: ProblemId::new(format!("problem-{}", (1..21).fake::<u32>())),
        problem_title: title_case(Words(2..3).fake()),
        timestamp: reference_time() - Duration::minutes((0..60 * 24 * 40).fake::<i64>()),
        status,
        runtime,
        memory,
        language: "JavaScript".to_string(),
        code: "function solve() {\n  return null;\n}".to_string(),
    }
}

/// Create `count` submissions with ids `sub-1..=count`
pub fn create_test_submissions(count: usize) -> Vec<SubmissionRecord> {
    (1..=count).map(create_test_submission).collect()
}

/// Create a discussion thread with one or two tags
pub fn create_test_thread(n: usize) -> DiscussionThread {
    let kinds = [
        TagKind::Algorithm,
        TagKind::Debugging,
        TagKind::Python,
        TagKind::Javascript,
        TagKind::Java,
        TagKind::BestPractice,
    ];
    let mut tags = vec![ThreadTag::new(title_case(Words(1..2).fake()), pick(&kinds))];
    if (0..2).fake::<u8>() == 0 {
        tags.push(ThreadTag::new(title_case(Words(1..2).fake()), TagKind::Default));
    }

    DiscussionThread {
        id: ThreadId::new(n.to_string()),
        author: ThreadAuthor {
            name: Name().fake(),
            reputation: (0..3000).fake(),
        },
        title: Sentence(4..10).fake(),
        content: Paragraph(2..4).fake(),
        tags,
        posted: format!("{} hours ago", (1..24).fake::<u32>()),
        replies: (0..30).fake(),
        upvotes: (0..100).fake(),
        has_best_answer: (0..2).fake::<u8>() == 0,
    }
}

/// Create a contest pool entry
pub fn create_test_pool_problem(n: usize) -> PoolProblem {
    PoolProblem {
        id: ProblemId::new(format!("prob-{n:03}")),
        title: title_case(Words(2..4).fake()),
        difficulty: pick(&Difficulty::ALL),
        topics: vec![title_case(Words(1..3).fake())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_problems() {
        let problems = create_test_problems(5);
        assert_eq!(problems.len(), 5);
        assert_eq!(problems[4].id.as_str(), "problem-5");
        for problem in &problems {
            assert!(!problem.topics.is_empty());
            assert!(problem.success_rate < 100);
        }
    }

    #[test]
    fn test_unfinished_submissions_are_unmeasured() {
        for record in create_test_submissions(30) {
            if record.status == SubmissionStatus::TimeLimitExceeded {
                assert!(!record.runtime.is_available());
            }
        }
    }

    #[test]
    fn test_leaderboard_ranks() {
        let users = create_test_leaderboard(10);
        let ranks: Vec<u32> = users.iter().map(|u| u.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
    }
}
