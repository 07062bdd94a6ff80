use super::entity::Movie;
use crate::domain::vote::find_duplicate_voter;
use crate::domain::{DomainError, DomainResult};

/// Validates all Movie invariants
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_title(&movie.title)?;
    validate_added_by(&movie.added_by)?;
    validate_votes(&movie.votes)?;
    Ok(())
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_added_by(added_by: &str) -> DomainResult<()> {
    if added_by.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie must record who suggested it".to_string(),
        ));
    }
    Ok(())
}

fn validate_votes(votes: &[String]) -> DomainResult<()> {
    if let Some(nickname) = find_duplicate_voter(votes) {
        return Err(DomainError::InvariantViolation(format!(
            "Nickname {} voted twice",
            nickname
        )));
    }
    Ok(())
}

/// Invariants that must hold true for Movie domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Title cannot be empty
/// 3. A nickname appears at most once in votes
/// 4. Zero votes is a valid state; only explicit deletion removes a movie
/// 5. Created timestamp never changes
