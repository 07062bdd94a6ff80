// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod date_poll;
pub mod lottery;
pub mod movie;
pub mod session;
pub mod vote;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{validate_movie, Movie, MovieMetadata, VOTER_PREVIEW_LIMIT};

// Date Poll Domain
pub use date_poll::{
    parse_poll_date, rank_polls, repair_polls, toggle_date_vote, validate_date_poll,
    validate_date_polls, DatePoll, DateVoteOutcome,
};

// Session
pub use session::Session;

// Vote Ledger
pub use vote::{toggle_vote, VoteToggle};

// Lottery (Derived, never persisted)
pub use lottery::{
    Draw, DrawStep, LotteryPhase, LotteryTiming, RandomSource, SequenceRandom, StdRandom,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
