// src/repositories/movie_repository.rs
//
// Movie list persistence - the whole list is one record

use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::Movie;
use crate::error::AppResult;
use crate::repositories::record_store::{self, MOVIE_DATA_LIST};

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    /// Stored list in board order; empty when nothing was saved yet
    fn load(&self) -> AppResult<Vec<Movie>>;

    /// Replace the stored list
    fn save(&self, movies: &[Movie]) -> AppResult<()>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn load(&self) -> AppResult<Vec<Movie>> {
        let conn = get_connection(&self.pool)?;
        Ok(record_store::read_json(&conn, MOVIE_DATA_LIST)?.unwrap_or_default())
    }

    fn save(&self, movies: &[Movie]) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        record_store::write_json(&conn, MOVIE_DATA_LIST, movies)
    }
}
