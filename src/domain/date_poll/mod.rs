//! Critical DatePoll Invariants:
//!
//! 1. At most one DatePoll per calendar date
//! 2. A DatePoll always has at least one vote (empty polls are pruned)
//! 3. A nickname appears at most once in votes
//! 4. Re-voting a pruned date opens a new poll with a new identity

pub mod entity;
pub mod invariants;
pub mod ledger;

pub use entity::{parse_poll_date, DatePoll, DATE_FORMAT};
pub use invariants::{validate_date_poll, validate_date_polls};
pub use ledger::{rank_polls, repair_polls, toggle_date_vote, DateVoteOutcome};
