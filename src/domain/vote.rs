//! Vote ledger primitives shared by movies and date polls.
//!
//! A votes sequence is an ordered list of nicknames with set semantics:
//! a nickname is present at most once and the order is the order of voting.

use serde::{Deserialize, Serialize};

/// What a toggle did to a votes sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteToggle {
    Added,
    Removed,
}

impl VoteToggle {
    pub fn is_added(self) -> bool {
        matches!(self, VoteToggle::Added)
    }
}

/// Remove `nickname` if present, append it otherwise.
/// The relative order of the other voters is never changed.
pub fn toggle_vote(votes: &mut Vec<String>, nickname: &str) -> VoteToggle {
    match votes.iter().position(|v| v == nickname) {
        Some(idx) => {
            votes.remove(idx);
            VoteToggle::Removed
        }
        None => {
            votes.push(nickname.to_string());
            VoteToggle::Added
        }
    }
}

pub fn has_voted(votes: &[String], nickname: &str) -> bool {
    votes.iter().any(|v| v == nickname)
}

/// Returns the first nickname that appears more than once, if any
pub fn find_duplicate_voter(votes: &[String]) -> Option<&str> {
    votes
        .iter()
        .enumerate()
        .find(|(idx, v)| votes[..*idx].contains(*v))
        .map(|(_, v)| v.as_str())
}
