// src/services/movie_service.rs
//
// The movie suggestion board.
//
// The list lives in memory for the whole run and is written back in full
// after every change. A failed write is logged and otherwise ignored: the
// in-memory board stays authoritative until the next successful save.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use uuid::Uuid;

use crate::domain::{validate_movie, Movie, Session};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MovieAdded, MovieDeleted, MovieVoteToggled};
use crate::repositories::MovieRepository;
use crate::services::{require_session, LookupService};

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
    lookup: Arc<LookupService>,
    event_bus: Arc<EventBus>,
    movies: Mutex<Vec<Movie>>,
}

impl MovieService {
    /// Load the stored board. An unreadable record starts an empty board;
    /// the repository has already kept its raw text under a backup key.
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        lookup: Arc<LookupService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let movies = movie_repo.load().unwrap_or_else(|e| {
            warn!("Stored movie list could not be read, starting empty: {}", e);
            Vec::new()
        });
        info!("Loaded {} movies", movies.len());

        Self {
            movie_repo,
            lookup,
            event_bus,
            movies: Mutex::new(movies),
        }
    }

    fn board(&self) -> MutexGuard<'_, Vec<Movie>> {
        self.movies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, movies: &[Movie]) {
        if let Err(e) = self.movie_repo.save(movies) {
            warn!("Failed to persist movie list: {}", e);
        }
    }

    /// Look the name up and put the result at the top of the board.
    /// The suggester's vote is already counted.
    pub async fn add_movie(&self, session: Option<&Session>, raw_name: &str) -> AppResult<Movie> {
        let session = require_session(session)?;
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Movie name cannot be empty".to_string()));
        }

        let metadata = self.lookup.lookup_movie(name, session.nickname()).await;
        let movie = Movie::from_metadata(metadata);
        validate_movie(&movie)?;

        {
            let mut movies = self.board();
            movies.insert(0, movie.clone());
            self.persist(&movies);
        }

        info!("{} added \"{}\"", movie.added_by, movie.title);
        self.event_bus.emit(MovieAdded::new(
            movie.id,
            movie.title.clone(),
            movie.added_by.clone(),
        ));

        Ok(movie)
    }

    /// Toggle the session's vote on a movie
    pub fn vote_movie(&self, session: Option<&Session>, movie_id: Uuid) -> AppResult<Movie> {
        let session = require_session(session)?;

        let (movie, toggle) = {
            let mut movies = self.board();
            let movie = movies
                .iter_mut()
                .find(|m| m.id == movie_id)
                .ok_or(AppError::NotFound)?;
            let toggle = movie.toggle_vote(session.nickname());
            let movie = movie.clone();
            self.persist(&movies);
            (movie, toggle)
        };

        if toggle.is_added() {
            info!("{} voted for \"{}\"", session, movie.title);
        } else {
            info!("{} withdrew vote for \"{}\"", session, movie.title);
        }
        self.event_bus.emit(MovieVoteToggled::new(
            movie.id,
            session.nickname().to_string(),
            toggle,
            movie.vote_count(),
        ));

        Ok(movie)
    }

    /// Remove a movie from the board. Any participant may delete.
    pub fn delete_movie(&self, session: Option<&Session>, movie_id: Uuid) -> AppResult<Movie> {
        let session = require_session(session)?;

        let removed = {
            let mut movies = self.board();
            let idx = movies
                .iter()
                .position(|m| m.id == movie_id)
                .ok_or(AppError::NotFound)?;
            let removed = movies.remove(idx);
            self.persist(&movies);
            removed
        };

        info!("{} deleted \"{}\"", session, removed.title);
        self.event_bus.emit(MovieDeleted::new(
            removed.id,
            removed.title.clone(),
            session.nickname().to_string(),
        ));

        Ok(removed)
    }

    /// Snapshot of the board, newest first
    pub fn list_movies(&self) -> Vec<Movie> {
        self.board().clone()
    }

    pub fn get_movie(&self, movie_id: Uuid) -> Option<Movie> {
        self.board().iter().find(|m| m.id == movie_id).cloned()
    }
}
