//! Date poll bookkeeping over the whole list of polls.
//!
//! Polls are created on the first vote for a date and pruned as soon as
//! their last voter leaves, so the list never carries zero-vote rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::DatePoll;
use crate::domain::vote::VoteToggle;

/// Result of toggling a vote on a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DateVoteOutcome {
    /// No poll existed for the date; one was opened with this vote
    Created { poll_id: Uuid },
    /// Vote appended to an existing poll
    Added { poll_id: Uuid },
    /// Vote removed, other voters remain
    Removed { poll_id: Uuid },
    /// Vote removed and it was the last one; the poll is gone
    Pruned { poll_id: Uuid },
}

impl DateVoteOutcome {
    pub fn poll_id(&self) -> Uuid {
        match *self {
            DateVoteOutcome::Created { poll_id }
            | DateVoteOutcome::Added { poll_id }
            | DateVoteOutcome::Removed { poll_id }
            | DateVoteOutcome::Pruned { poll_id } => poll_id,
        }
    }

    /// Whether the nickname is counted on the date afterwards
    pub fn is_voting(&self) -> bool {
        matches!(
            self,
            DateVoteOutcome::Created { .. } | DateVoteOutcome::Added { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateVoteOutcome::Created { .. } => "created",
            DateVoteOutcome::Added { .. } => "added",
            DateVoteOutcome::Removed { .. } => "removed",
            DateVoteOutcome::Pruned { .. } => "pruned",
        }
    }
}

/// Toggle `nickname`'s availability on `date`
pub fn toggle_date_vote(
    polls: &mut Vec<DatePoll>,
    date: NaiveDate,
    nickname: &str,
) -> DateVoteOutcome {
    let Some(idx) = polls.iter().position(|p| p.date == date) else {
        let poll = DatePoll::new(date, nickname);
        let poll_id = poll.id;
        polls.push(poll);
        return DateVoteOutcome::Created { poll_id };
    };

    let poll_id = polls[idx].id;
    match polls[idx].toggle_vote(nickname) {
        VoteToggle::Added => DateVoteOutcome::Added { poll_id },
        VoteToggle::Removed if polls[idx].votes.is_empty() => {
            polls.remove(idx);
            DateVoteOutcome::Pruned { poll_id }
        }
        VoteToggle::Removed => DateVoteOutcome::Removed { poll_id },
    }
}

/// Bring a list that breaks the poll invariants back in line without
/// losing any voter. Later polls for an already-seen date fold into the
/// first one, repeated nicknames are kept once, and voterless polls go.
pub fn repair_polls(polls: Vec<DatePoll>) -> Vec<DatePoll> {
    let mut repaired: Vec<DatePoll> = Vec::with_capacity(polls.len());

    for DatePoll { id, date, votes } in polls {
        let idx = match repaired.iter().position(|p| p.date == date) {
            Some(idx) => idx,
            None => {
                repaired.push(DatePoll {
                    id,
                    date,
                    votes: Vec::new(),
                });
                repaired.len() - 1
            }
        };

        let target = &mut repaired[idx];
        for nickname in votes {
            if !target.has_voted(&nickname) {
                target.votes.push(nickname);
            }
        }
    }

    repaired.retain(|p| !p.votes.is_empty());
    repaired
}

/// Display order: most votes first, ties broken by the earlier date
pub fn rank_polls(polls: &[DatePoll]) -> Vec<DatePoll> {
    let mut ranked = polls.to_vec();
    ranked.sort_by(|a, b| {
        b.vote_count()
            .cmp(&a.vote_count())
            .then_with(|| a.date.cmp(&b.date))
    });
    ranked
}
