// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// RULES:
// - Accept plain values
// - Call services
// - Return DTOs
// - Never contain business logic

use uuid::Uuid;

use crate::application::{dto::MovieDto, error_handling::ToErrorResponse, state::AppState};
use crate::domain::Session;
use crate::error::{AppError, AppResult};

fn parse_movie_id(movie_id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(movie_id.trim())
        .map_err(|e| AppError::Validation(format!("Invalid movie id: {}", e)))
}

/// List the board, newest first
pub async fn list_movies(
    state: &AppState,
    session: Option<&Session>,
) -> Result<Vec<MovieDto>, String> {
    Ok(state
        .movie_service
        .list_movies()
        .iter()
        .map(|m| MovieDto::for_viewer(m, session))
        .collect())
}

/// Suggest a movie by name. The lookup never fails the command.
pub async fn add_movie(
    state: &AppState,
    session: Option<&Session>,
    name: String,
) -> Result<MovieDto, String> {
    state
        .movie_service
        .add_movie(session, &name)
        .await
        .map(|m| MovieDto::for_viewer(&m, session))
        .to_error_response()
}

/// Toggle the caller's vote
pub async fn vote_movie(
    state: &AppState,
    session: Option<&Session>,
    movie_id: String,
) -> Result<MovieDto, String> {
    parse_movie_id(&movie_id)
        .and_then(|id| state.movie_service.vote_movie(session, id))
        .map(|m| MovieDto::for_viewer(&m, session))
        .to_error_response()
}

pub async fn delete_movie(
    state: &AppState,
    session: Option<&Session>,
    movie_id: String,
) -> Result<MovieDto, String> {
    parse_movie_id(&movie_id)
        .and_then(|id| state.movie_service.delete_movie(session, id))
        .map(|m| MovieDto::for_viewer(&m, session))
        .to_error_response()
}
