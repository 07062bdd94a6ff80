// src/lib.rs
// MovieNight - Local-first movie night planner
//
// Architecture:
// - Domain-centric: vote ledger, date poll and the draw live in `domain`
// - Event-driven: services announce every change on the event bus
// - Explicit: the participant's Session is passed into every command
// - Local-first: one SQLite file holds the whole board
// - Application Layer: command boundary for any front end

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    // Dates
    DatePoll,
    DateVoteOutcome,
    // Lottery
    Draw,
    DrawStep,
    LotteryPhase,
    LotteryTiming,
    // Movies
    Movie,
    MovieMetadata,
    RandomSource,
    // Session
    Session,
    StdRandom,
    VoteToggle,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, LookupError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    DrawHighlightMoved,
    EventBus,
    EventLogEntry,
    WinnerAnnounced,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    DatePollService,
    DrawOutcome,
    LookupService,
    LotteryService,
    LotteryState,
    MovieService,
    SessionService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use application::commands;
pub use application::dto;

pub use config::AppConfig;
pub use integrations::{GeminiClient, MetadataProvider};
