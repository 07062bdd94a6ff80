// src/repositories/session_repository.rs
//
// Persistence of the last nickname used on this installation.
// The stored value only pre-fills the front end at startup.

use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::Session;
use crate::error::AppResult;
use crate::repositories::record_store::{self, MOVIE_USER};

#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn load(&self) -> AppResult<Option<Session>>;
    fn save(&self, session: &Session) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct SqliteSessionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn load(&self) -> AppResult<Option<Session>> {
        let conn = get_connection(&self.pool)?;
        let stored: Option<Session> = record_store::read_json(&conn, MOVIE_USER)?;

        // A hand-edited record may hold a blank name
        match stored {
            Some(session) => Ok(Some(Session::new(session.nickname())?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        record_store::write_json(&conn, MOVIE_USER, session)
    }

    fn clear(&self) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        record_store::delete_record(&conn, MOVIE_USER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn repo() -> SqliteSessionRepository {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        SqliteSessionRepository::new(Arc::new(pool))
    }

    #[test]
    fn test_save_load_clear() {
        let repo = repo();
        assert_eq!(repo.load().unwrap(), None);

        let session = Session::new("Ken").unwrap();
        repo.save(&session).unwrap();
        assert_eq!(repo.load().unwrap(), Some(session));

        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_stored_shape_is_name_object() {
        let repo = repo();
        repo.save(&Session::new("Mia").unwrap()).unwrap();

        let conn = get_connection(&repo.pool).unwrap();
        let raw = record_store::read_record(&conn, MOVIE_USER).unwrap().unwrap();
        assert_eq!(raw, r#"{"name":"Mia"}"#);
    }

    #[test]
    fn test_blank_stored_name_is_rejected() {
        let repo = repo();
        {
            let conn = get_connection(&repo.pool).unwrap();
            record_store::write_record(&conn, MOVIE_USER, r#"{"name":"  "}"#).unwrap();
        }
        assert!(repo.load().is_err());
    }
}
