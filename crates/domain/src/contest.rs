//! Contest drafts, the selectable problem pool and scheduled contests.

use crate::identifiers::{ContestId, ProblemId};
use crate::problem::Difficulty;
use crate::validation::ValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Who can see a contest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestVisibility {
    /// Listed for everyone
    #[default]
    Public,
    /// Invite only
    Private,
}

/// Problem offered by the contest builder's picker.
///
/// Pool topics are free text ("Hash Table", "Divide and Conquer") and do not
/// follow the practice-problem taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolProblem {
    /// Pool problem id
    pub id: ProblemId,
    /// Problem title
    pub title: String,
    /// Problem difficulty
    pub difficulty: Difficulty,
    /// Free-text topic labels
    pub topics: Vec<String>,
}

/// Contest form state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContestDraft {
    /// Contest name
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    /// Rules and overview shown to participants
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    /// Scheduled start
    pub start: Option<DateTime<Utc>>,
    /// Scheduled end; must follow `start`
    pub end: Option<DateTime<Utc>>,

    /// Per-participant time limit
    #[validate(range(min = 1, max = 3, message = "Time limit must be 1, 2 or 3 hours"))]
    pub time_limit_hours: u8,

    /// Who can find and join the contest
    pub visibility: ContestVisibility,
    /// Overall difficulty label
    pub difficulty: Difficulty,

    /// Languages participants may submit in
    #[validate(length(min = 1, message = "Select at least one language"))]
    pub languages: Vec<String>,

    /// Maximum participants; `None` means unlimited
    pub registration_limit: Option<u32>,

    /// Selected pool problems, in selection order
    #[validate(length(min = 1, message = "At least one problem must be selected"))]
    pub problems: Vec<ProblemId>,

    /// Notify followers when the contest is published
    pub send_notifications: bool,
}

impl Default for ContestDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start: None,
            end: None,
            time_limit_hours: 2,
            visibility: ContestVisibility::Public,
            difficulty: Difficulty::Medium,
            languages: vec!["javascript".into(), "python".into(), "java".into()],
            registration_limit: None,
            problems: Vec::new(),
            send_notifications: true,
        }
    }
}

impl ContestDraft {
    /// Validate every field against `now` and collect all failures.
    ///
    /// Field rules come from the derive; the schedule rules (start in the
    /// future, end after start) need the clock and are checked here.
    pub fn validate_at(&self, now: DateTime<Utc>) -> ValidationResult {
        let mut result = match self.validate() {
            Ok(()) => ValidationResult::success(),
            Err(errors) => ValidationResult::from(errors),
        };

        match self.start {
            None => result.add_error("start_date", "Start date is required"),
            Some(start) if start <= now => {
                result.add_error("start_date", "Start date must be in the future")
            }
            Some(_) => {}
        }

        match (self.start, self.end) {
            (_, None) => result.add_error("end_date", "End date is required"),
            (Some(start), Some(end)) if end <= start => {
                result.add_error("end_date", "End date must be after start date")
            }
            _ => {}
        }

        result
    }
}

/// Where a contest sits relative to a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContestPhase {
    /// Start is still ahead
    Upcoming,
    /// Started, not yet ended
    InProgress,
    /// End has passed
    Ended,
}

/// Listing tab on the contests screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestTab {
    /// Contests that have not started
    #[default]
    Upcoming,
    /// Contests that have started, finished or not
    Previous,
}

impl ContestTab {
    /// Whether a contest in `phase` is listed under this tab
    pub fn includes(&self, phase: ContestPhase) -> bool {
        match self {
            Self::Upcoming => phase == ContestPhase::Upcoming,
            Self::Previous => phase != ContestPhase::Upcoming,
        }
    }
}

/// A scheduled contest as shown on the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSummary {
    /// Contest slug, such as `weekly-challenge-24`
    pub id: ContestId,
    /// Contest name
    pub title: String,
    /// One-paragraph pitch
    pub description: String,
    /// When the contest opens
    pub start: DateTime<Utc>,
    /// When the contest closes
    pub end: DateTime<Utc>,
    /// Overall difficulty label
    pub difficulty: Difficulty,
    /// Registered participants
    pub participants: u32,
}

impl ContestSummary {
    /// Phase at `now`. A contest is upcoming only while its start is
    /// strictly ahead, and ended once its end is no longer ahead.
    pub fn phase_at(&self, now: DateTime<Utc>) -> ContestPhase {
        if self.start > now {
            ContestPhase::Upcoming
        } else if self.end > now {
            ContestPhase::InProgress
        } else {
            ContestPhase::Ended
        }
    }

    /// Card status line: "Starts in 3 days", "Starts in 5 hours",
    /// "In progress" or "Ended".
    ///
    /// Whole days win over hours; both round down.
    pub fn status_at(&self, now: DateTime<Utc>) -> String {
        match self.phase_at(now) {
            ContestPhase::Upcoming => {
                let until = self.start - now;
                let days = until.num_days();
                if days > 0 {
                    format!("Starts in {}", plural(days, "day"))
                } else {
                    format!("Starts in {}", plural(until.num_hours(), "hour"))
                }
            }
            ContestPhase::InProgress => "In progress".to_string(),
            ContestPhase::Ended => "Ended".to_string(),
        }
    }

    /// "1 participant", "348 participants"
    pub fn participants_label(&self) -> String {
        plural(i64::from(self.participants), "participant")
    }
}

fn plural(count: i64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_draft(now: DateTime<Utc>) -> ContestDraft {
        ContestDraft {
            title: "Weekly Sprint".into(),
            description: "Five problems in two hours".into(),
            start: Some(now + Duration::days(1)),
            end: Some(now + Duration::days(1) + Duration::hours(2)),
            problems: vec![ProblemId::new("prob-001")],
            ..ContestDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let now = Utc::now();
        let result = valid_draft(now).validate_at(now);
        assert!(result.valid, "{}", result.summary());
    }

    #[test]
    fn test_field_rules_collect_all_messages() {
        let now = Utc::now();
        let draft = ContestDraft {
            title: "Cup".into(),
            description: "short".into(),
            languages: vec![],
            problems: vec![],
            ..valid_draft(now)
        };

        let result = draft.validate_at(now);
        assert!(!result.valid);
        assert_eq!(
            result.messages_for("title").collect::<Vec<_>>(),
            vec!["Title must be at least 5 characters"]
        );
        assert_eq!(
            result.messages_for("description").collect::<Vec<_>>(),
            vec!["Description must be at least 10 characters"]
        );
        assert_eq!(result.messages_for("languages").count(), 1);
        assert_eq!(
            result.messages_for("problems").collect::<Vec<_>>(),
            vec!["At least one problem must be selected"]
        );
    }

    #[test]
    fn test_schedule_rules() {
        let now = Utc::now();
        let mut draft = valid_draft(now);
        draft.start = Some(now - Duration::minutes(1));
        draft.end = draft.start;

        let result = draft.validate_at(now);
        assert_eq!(
            result.messages_for("start_date").collect::<Vec<_>>(),
            vec!["Start date must be in the future"]
        );
        assert_eq!(
            result.messages_for("end_date").collect::<Vec<_>>(),
            vec!["End date must be after start date"]
        );
    }

    #[test]
    fn test_time_limit_range() {
        let now = Utc::now();
        let draft = ContestDraft {
            time_limit_hours: 4,
            ..valid_draft(now)
        };
        let result = draft.validate_at(now);
        assert_eq!(result.messages_for("time_limit_hours").count(), 1);
    }

    fn scheduled(start: DateTime<Utc>, hours: i64) -> ContestSummary {
        ContestSummary {
            id: ContestId::new("weekly-challenge-24"),
            title: "Weekly Challenge #24".into(),
            description: "Solve 5 algorithmic problems in 2 hours".into(),
            start,
            end: start + Duration::hours(hours),
            difficulty: Difficulty::Medium,
            participants: 348,
        }
    }

    #[test]
    fn test_contest_phase_boundaries() {
        let now = Utc::now();
        assert_eq!(scheduled(now + Duration::seconds(1), 2).phase_at(now), ContestPhase::Upcoming);
        assert_eq!(scheduled(now, 2).phase_at(now), ContestPhase::InProgress);
        assert_eq!(scheduled(now - Duration::hours(2), 2).phase_at(now), ContestPhase::Ended);

        assert!(ContestTab::Upcoming.includes(ContestPhase::Upcoming));
        assert!(ContestTab::Previous.includes(ContestPhase::InProgress));
        assert!(!ContestTab::Previous.includes(ContestPhase::Upcoming));
    }

    #[test]
    fn test_contest_status_line() {
        let now = Utc::now();
        assert_eq!(scheduled(now + Duration::days(3), 2).status_at(now), "Starts in 3 days");
        assert_eq!(scheduled(now + Duration::hours(25), 2).status_at(now), "Starts in 1 day");
        assert_eq!(scheduled(now + Duration::minutes(90), 2).status_at(now), "Starts in 1 hour");
        assert_eq!(scheduled(now + Duration::minutes(20), 2).status_at(now), "Starts in 0 hours");
        assert_eq!(scheduled(now - Duration::hours(1), 2).status_at(now), "In progress");
        assert_eq!(scheduled(now - Duration::days(7), 2).status_at(now), "Ended");
    }

    #[test]
    fn test_participants_label() {
        let mut contest = scheduled(Utc::now(), 2);
        assert_eq!(contest.participants_label(), "348 participants");
        contest.participants = 1;
        assert_eq!(contest.participants_label(), "1 participant");
    }
}
