// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - NO cross-repository calls
// - Each record is read and written whole

pub mod record_store;
pub mod session_repository;
pub mod movie_repository;
pub mod date_poll_repository;

pub use session_repository::{SessionRepository, SqliteSessionRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};
pub use date_poll_repository::{DatePollRepository, SqliteDatePollRepository};

#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
#[cfg(test)]
pub use date_poll_repository::MockDatePollRepository;
