//! Static seed records.
//!
//! Leaderboards, submissions, threads, the contest pool and the contest
//! schedule are embedded JSON. Contest times are stored as offsets and
//! resolved against the caller's clock. The twenty practice problems are
//! generated from five templates with fixed metrics so every run sees the
//! same catalog.

use chrono::{DateTime, Duration, TimeZone, Utc};
use codearena_domain::contest::{ContestSummary, PoolProblem};
use codearena_domain::problem::{ProblemExample, TestCase};
use codearena_domain::{
    ContestId, DiscussionThread, Difficulty, LeaderboardUser, Problem, ProblemId,
    SubmissionRecord, Topic,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Error, Result};

const LEADERBOARD_JSON: &str = include_str!("data/leaderboard.json");
const SUBMISSIONS_JSON: &str = include_str!("data/submissions.json");
const THREADS_JSON: &str = include_str!("data/threads.json");
const CONTEST_POOL_JSON: &str = include_str!("data/contest_pool.json");
const CONTESTS_JSON: &str = include_str!("data/contests.json");

/// Number of generated practice problems
pub const PROBLEM_COUNT: usize = 20;

fn parse<T: DeserializeOwned>(name: &'static str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|source| Error::Seed { name, source })
}

#[derive(Deserialize)]
struct LeaderboardSeed {
    global: Vec<LeaderboardUser>,
    friends: Vec<LeaderboardUser>,
}

/// Global and friends rankings
pub fn leaderboards() -> Result<(Vec<LeaderboardUser>, Vec<LeaderboardUser>)> {
    let seed: LeaderboardSeed = parse("leaderboard", LEADERBOARD_JSON)?;
    Ok((seed.global, seed.friends))
}

pub fn submissions() -> Result<Vec<SubmissionRecord>> {
    parse("submissions", SUBMISSIONS_JSON)
}

pub fn threads() -> Result<Vec<DiscussionThread>> {
    parse("threads", THREADS_JSON)
}

pub fn contest_pool() -> Result<Vec<PoolProblem>> {
    parse("contest_pool", CONTEST_POOL_JSON)
}

#[derive(Deserialize)]
struct ContestSeed {
    id: ContestId,
    title: String,
    description: String,
    /// Negative for contests that already started
    starts_in_minutes: i64,
    duration_minutes: i64,
    difficulty: Difficulty,
    participants: u32,
}

/// Scheduled contests with times resolved against `now`
pub fn contests(now: DateTime<Utc>) -> Result<Vec<ContestSummary>> {
    let seeds: Vec<ContestSeed> = parse("contests", CONTESTS_JSON)?;
    Ok(seeds
        .into_iter()
        .map(|seed| {
            let start = now + Duration::minutes(seed.starts_in_minutes);
            ContestSummary {
                id: seed.id,
                title: seed.title,
                description: seed.description,
                start,
                end: start + Duration::minutes(seed.duration_minutes),
                difficulty: seed.difficulty,
                participants: seed.participants,
            }
        })
        .collect())
}

struct Template {
    name: &'static str,
    description: &'static str,
    example: (&'static str, &'static str, &'static str),
    constraints: &'static [&'static str],
}

const TEMPLATES: [Template; 5] = [
    Template {
        name: "Two Sum",
        description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.",
        example: (
            "nums = [2,7,11,15], target = 9",
            "[0,1]",
            "Because nums[0] + nums[1] = 2 + 7 = 9, return [0, 1].",
        ),
        constraints: &["2 <= nums.length <= 10^4", "-10^9 <= nums[i] <= 10^9", "-10^9 <= target <= 10^9"],
    },
    Template {
        name: "Merge Intervals",
        description: "Given an array of intervals where intervals[i] = [start, end], merge all overlapping intervals.",
        example: (
            "intervals = [[1,3],[2,6],[8,10],[15,18]]",
            "[[1,6],[8,10],[15,18]]",
            "Intervals [1,3] and [2,6] overlap and are merged into [1,6].",
        ),
        constraints: &["1 <= intervals.length <= 10^4", "intervals[i].length == 2", "0 <= start <= end <= 10^4"],
    },
    Template {
        name: "LRU Cache",
        description: "Design a data structure that follows the constraints of a Least Recently Used cache.",
        example: (
            "capacity = 2, put(1,1), put(2,2), get(1), put(3,3), get(2)",
            "[1,-1]",
            "Key 2 is evicted when key 3 is inserted.",
        ),
        constraints: &["1 <= capacity <= 3000", "At most 2 * 10^5 calls to get and put"],
    },
    Template {
        name: "Validate BST",
        description: "Given the root of a binary tree, determine if it is a valid binary search tree.",
        example: ("root = [2,1,3]", "true", "Every left child is smaller and every right child larger."),
        constraints: &["The number of nodes is in the range [1, 10^4]"],
    },
    Template {
        name: "Max Path Sum",
        description: "Given the root of a binary tree, return the maximum sum of any non-empty path.",
        example: ("root = [-10,9,20,null,null,15,7]", "42", "The path 15 -> 20 -> 7 sums to 42."),
        constraints: &["The number of nodes is in the range [1, 3 * 10^4]", "-1000 <= Node.val <= 1000"],
    },
];

/// Reference instant the generated creation dates count back from
pub fn catalog_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 11, 23, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The generated practice problems, `problem-1` through `problem-20`.
pub fn problems() -> Vec<Problem> {
    (0..PROBLEM_COUNT).map(problem).collect()
}

fn problem(i: usize) -> Problem {
    let template = &TEMPLATES[i % TEMPLATES.len()];
    let n = i as u32;

    // One to three topics, spread over the taxonomy
    let topic_count = 1 + (i * 7 + 3) % 3;
    let topics = (0..topic_count)
        .map(|k| Topic::ALL[(i * 5 + k * 4) % Topic::ALL.len()])
        .collect();

    let (input, output, explanation) = template.example;
    Problem {
        id: ProblemId::new(format!("problem-{}", i + 1)),
        title: format!("Problem {}: {} {}", i + 1, template.name, i / TEMPLATES.len() + 1),
        difficulty: Difficulty::ALL[(i * 2 + i / 3) % 3],
        topics,
        popularity: (n * 379 + 113) % 1000,
        success_rate: ((n * 37 + 41) % 100) as u8,
        attempt_count: (n * 1237 + 250) % 5000,
        is_new: i < 3,
        created_at: catalog_epoch() - Duration::days(((i * 11) % 30) as i64),
        description: template.description.to_string(),
        examples: vec![ProblemExample {
            input: input.to_string(),
            output: output.to_string(),
            explanation: Some(explanation.to_string()),
        }],
        constraints: template.constraints.iter().map(|c| c.to_string()).collect(),
        test_cases: vec![TestCase {
            input: input.to_string(),
            expected_output: output.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_seeds_parse() {
        let (global, friends) = leaderboards().unwrap();
        assert_eq!(global.len(), 10);
        assert_eq!(friends.len(), 4);
        assert_eq!(global[0].username, "CodeMaster");
        assert_eq!(friends[3].rank_change, Some(5));

        let submissions = submissions().unwrap();
        assert_eq!(submissions.len(), 4);
        assert!(!submissions[3].runtime.is_available());

        assert_eq!(threads().unwrap().len(), 5);
        assert_eq!(contest_pool().unwrap().len(), 8);
    }

    #[test]
    fn test_contest_schedule_is_relative_to_now() {
        let now = catalog_epoch();
        let contests = contests(now).unwrap();
        assert_eq!(contests.len(), 7);

        let first = &contests[0];
        assert_eq!(first.id.as_str(), "weekly-challenge-24");
        assert_eq!(first.start, now + Duration::days(1));
        assert_eq!(first.end - first.start, Duration::hours(2));

        assert_eq!(contests.iter().filter(|c| c.start > now).count(), 3);
        assert!(contests.iter().all(|c| c.end > c.start));
    }

    #[test]
    fn test_generated_problems_are_deterministic() {
        let first = problems();
        assert_eq!(first, problems());
        assert_eq!(first.len(), PROBLEM_COUNT);
        assert_eq!(first[0].title, "Problem 1: Two Sum 1");
        assert_eq!(first[19].title, "Problem 20: Max Path Sum 4");

        let ids: HashSet<_> = first.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), PROBLEM_COUNT);
        for p in &first {
            assert!((1..=3).contains(&p.topics.len()), "{}", p.id);
            assert!(p.success_rate <= 100);
            assert!(p.popularity < 1000);
        }
        assert_eq!(first.iter().filter(|p| p.is_new).count(), 3);
    }

    #[test]
    fn test_every_difficulty_is_seeded() {
        let problems = problems();
        for difficulty in Difficulty::ALL {
            assert!(problems.iter().any(|p| p.difficulty == difficulty));
        }
    }
}
