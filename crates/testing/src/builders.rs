//! Fluent builder pattern for constructing test data.
//!
//! Every builder starts from a plain, fixed record so a test only spells out
//! the fields it is asserting on.

use chrono::{DateTime, TimeZone, Utc};
use codearena_domain::community::ThreadAuthor;
use codearena_domain::contest::PoolProblem;
use codearena_domain::{
    Difficulty, DiscussionThread, LeaderboardUser, Measurement, Problem, ProblemId, RankingTrend,
    SubmissionId, SubmissionRecord, SubmissionStatus, TagKind, ThreadId, ThreadTag, Topic, UserId,
};
use indexmap::IndexSet;

/// Instant the builders stamp records with unless told otherwise
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 11, 23, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Builder for practice problems
#[derive(Clone)]
pub struct ProblemBuilder {
    problem: Problem,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self {
            problem: Problem {
                id: ProblemId::new("problem-test"),
                title: "Test Problem".to_string(),
                difficulty: Difficulty::Easy,
                topics: IndexSet::new(),
                popularity: 0,
                success_rate: 50,
                attempt_count: 0,
                is_new: false,
                created_at: reference_time(),
                description: String::new(),
                examples: vec![],
                constraints: vec![],
                test_cases: vec![],
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.problem.id = ProblemId::new(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.problem.title = title.into();
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.problem.difficulty = difficulty;
        self
    }

    pub fn topics(mut self, topics: impl IntoIterator<Item = Topic>) -> Self {
        self.problem.topics = topics.into_iter().collect();
        self
    }

    pub fn popularity(mut self, popularity: u32) -> Self {
        self.problem.popularity = popularity;
        self
    }

    pub fn success_rate(mut self, rate: u8) -> Self {
        self.problem.success_rate = rate.min(100);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.problem.created_at = at;
        self
    }

    pub fn new_badge(mut self) -> Self {
        self.problem.is_new = true;
        self
    }

    pub fn build(self) -> Problem {
        self.problem
    }
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ranked users
#[derive(Clone)]
pub struct LeaderboardUserBuilder {
    user: LeaderboardUser,
}

impl LeaderboardUserBuilder {
    pub fn new() -> Self {
        Self {
            user: LeaderboardUser {
                id: UserId::new("user-test"),
                rank: 1,
                username: "testuser".to_string(),
                xp: 0,
                problems_solved: 0,
                accuracy: 0,
                ranking_trend: RankingTrend::Stable,
                rank_change: None,
                achievements: vec![],
                country: None,
                streak: None,
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.user.id = UserId::new(id);
        self
    }

    pub fn rank(mut self, rank: u32) -> Self {
        self.user.rank = rank;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.user.username = username.into();
        self
    }

    pub fn xp(mut self, xp: u32) -> Self {
        self.user.xp = xp;
        self
    }

    pub fn solved(mut self, problems_solved: u32) -> Self {
        self.user.problems_solved = problems_solved;
        self
    }

    pub fn accuracy(mut self, accuracy: u8) -> Self {
        self.user.accuracy = accuracy.min(100);
        self
    }

    pub fn streak(mut self, streak: Option<u32>) -> Self {
        self.user.streak = streak;
        self
    }

    pub fn trend(mut self, trend: RankingTrend, change: Option<u32>) -> Self {
        self.user.ranking_trend = trend;
        self.user.rank_change = change;
        self
    }

    pub fn build(self) -> LeaderboardUser {
        self.user
    }
}

impl Default for LeaderboardUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for submission history records
#[derive(Clone)]
pub struct SubmissionBuilder {
    record: SubmissionRecord,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self {
            record: SubmissionRecord {
                id: SubmissionId::new("sub-test"),
                problem_id: ProblemId::new("problem-1"),
                problem_title: "Two Sum".to_string(),
                timestamp: reference_time(),
                status: SubmissionStatus::Accepted,
                runtime: Measurement::Millis(50.0),
                memory: Measurement::Megabytes(40.0),
                language: "JavaScript".to_string(),
                code: String::new(),
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.id = SubmissionId::new(id);
        self
    }

    pub fn problem(mut self, id: impl Into<String>) -> Self {
        self.record.problem_id = ProblemId::new(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.problem_title = title.into();
        self
    }

    pub fn status(mut self, status: SubmissionStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn runtime(mut self, runtime: Measurement) -> Self {
        self.record.runtime = runtime;
        self
    }

    pub fn memory(mut self, memory: Measurement) -> Self {
        self.record.memory = memory;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.record.timestamp = timestamp;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.record.language = language.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.record.code = code.into();
        self
    }

    pub fn build(self) -> SubmissionRecord {
        self.record
    }
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for discussion threads
#[derive(Clone)]
pub struct ThreadBuilder {
    thread: DiscussionThread,
}

impl ThreadBuilder {
    pub fn new() -> Self {
        Self {
            thread: DiscussionThread {
                id: ThreadId::new("thread-test"),
                author: ThreadAuthor {
                    name: "Test Author".to_string(),
                    reputation: 0,
                },
                title: "Test thread".to_string(),
                content: String::new(),
                tags: vec![],
                posted: "Just now".to_string(),
                replies: 0,
                upvotes: 0,
                has_best_answer: false,
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.thread.id = ThreadId::new(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.thread.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.thread.content = content.into();
        self
    }

    pub fn tag(mut self, name: impl Into<String>, kind: TagKind) -> Self {
        self.thread.tags.push(ThreadTag::new(name, kind));
        self
    }

    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.thread.author.name = name.into();
        self
    }

    pub fn build(self) -> DiscussionThread {
        self.thread
    }
}

impl Default for ThreadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for contest pool entries
#[derive(Clone)]
pub struct PoolProblemBuilder {
    problem: PoolProblem,
}

impl PoolProblemBuilder {
    pub fn new() -> Self {
        Self {
            problem: PoolProblem {
                id: ProblemId::new("prob-test"),
                title: "Test Pool Problem".to_string(),
                difficulty: Difficulty::Easy,
                topics: vec![],
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.problem.id = ProblemId::new(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.problem.title = title.into();
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.problem.difficulty = difficulty;
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.problem.topics.push(topic.into());
        self
    }

    pub fn build(self) -> PoolProblem {
        self.problem
    }
}

impl Default for PoolProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
