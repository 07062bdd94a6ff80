// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DateVoteOutcome, LotteryPhase, VoteToggle};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted when a participant enters a nickname
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicknameSet {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub nickname: String,
}

impl NicknameSet {
    pub fn new(nickname: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            nickname,
        }
    }
}

impl DomainEvent for NicknameSet {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NicknameSet" }
}

/// Emitted when the stored nickname is forgotten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicknameCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl NicknameCleared {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for NicknameCleared {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEvent for NicknameCleared {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NicknameCleared" }
}

// ============================================================================
// MOVIE BOARD EVENTS
// ============================================================================

/// Emitted when a suggestion lands on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub title: String,
    pub added_by: String,
}

impl MovieAdded {
    pub fn new(movie_id: Uuid, title: String, added_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            added_by,
        }
    }
}

impl DomainEvent for MovieAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieAdded" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieVoteToggled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub nickname: String,
    pub toggle: VoteToggle,
    pub vote_count: usize,
}

impl MovieVoteToggled {
    pub fn new(movie_id: Uuid, nickname: String, toggle: VoteToggle, vote_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            nickname,
            toggle,
            vote_count,
        }
    }
}

impl DomainEvent for MovieVoteToggled {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieVoteToggled" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub title: String,
    pub deleted_by: String,
}

impl MovieDeleted {
    pub fn new(movie_id: Uuid, title: String, deleted_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            deleted_by,
        }
    }
}

impl DomainEvent for MovieDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "MovieDeleted" }
}

// ============================================================================
// DATE POLL EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateVoteToggled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub nickname: String,
    pub outcome: DateVoteOutcome,
}

impl DateVoteToggled {
    pub fn new(date: NaiveDate, nickname: String, outcome: DateVoteOutcome) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            date,
            nickname,
            outcome,
        }
    }
}

impl DomainEvent for DateVoteToggled {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DateVoteToggled" }
}

// ============================================================================
// LOTTERY EVENTS
// ============================================================================

/// Emitted once the winner is fixed and the spin begins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub candidate_count: usize,
}

impl DrawStarted {
    pub fn new(candidate_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            candidate_count,
        }
    }
}

impl DomainEvent for DrawStarted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DrawStarted" }
}

/// Emitted on every animation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawHighlightMoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub title: String,
    pub phase: LotteryPhase,
    /// Wait before the next step
    pub delay_ms: u64,
}

impl DrawHighlightMoved {
    pub fn new(movie_id: Uuid, title: String, phase: LotteryPhase, delay_ms: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            phase,
            delay_ms,
        }
    }
}

impl DomainEvent for DrawHighlightMoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "DrawHighlightMoved" }
}

/// Emitted when the draw settles and the result is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerAnnounced {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: Uuid,
    pub title: String,
    pub platform: String,
    pub spin_steps: usize,
}

impl WinnerAnnounced {
    pub fn new(movie_id: Uuid, title: String, platform: String, spin_steps: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            platform,
            spin_steps,
        }
    }
}

impl DomainEvent for WinnerAnnounced {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "WinnerAnnounced" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultClosed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub winner_id: Option<Uuid>,
}

impl ResultClosed {
    pub fn new(winner_id: Option<Uuid>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            winner_id,
        }
    }
}

impl DomainEvent for ResultClosed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ResultClosed" }
}
