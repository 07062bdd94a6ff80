use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::vote::{self, VoteToggle};
use crate::domain::{DomainError, DomainResult};

/// Wire and storage format of a poll date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A candidate date and the participants available on it.
/// A DatePoll only exists while it has at least one vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePoll {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Voter nicknames in vote order, never duplicated
    pub votes: Vec<String>,
}

impl DatePoll {
    /// Open a poll for `date` with its first voter
    pub fn new(date: NaiveDate, first_voter: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            votes: vec![first_voter.to_string()],
        }
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn has_voted(&self, nickname: &str) -> bool {
        vote::has_voted(&self.votes, nickname)
    }

    pub fn toggle_vote(&mut self, nickname: &str) -> VoteToggle {
        vote::toggle_vote(&mut self.votes, nickname)
    }
}

/// Parse a `YYYY-MM-DD` string
pub fn parse_poll_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        DomainError::InvariantViolation(format!("Invalid date {:?}: {}", raw, e))
    })
}

impl std::fmt::Display for DatePoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} votes)", self.date.format(DATE_FORMAT), self.votes.len())
    }
}
