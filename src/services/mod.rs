// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own the in-memory board state, enforce session requirements,
// persist after each confirmed mutation and emit events.

pub mod lookup_service;
pub mod session_service;
pub mod movie_service;
pub mod date_poll_service;
pub mod lottery_service;

pub use lookup_service::{fallback_metadata, LookupService, FALLBACK_DESCRIPTION};
pub use session_service::SessionService;
pub use movie_service::MovieService;
pub use date_poll_service::DatePollService;
pub use lottery_service::{DrawOutcome, LotteryService, LotteryState};

use crate::domain::Session;
use crate::error::{AppError, AppResult};

/// Actions that change the board need a nickname
pub(crate) fn require_session(session: Option<&Session>) -> AppResult<&Session> {
    session.ok_or(AppError::SessionRequired)
}
