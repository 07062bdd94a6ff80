// src/repositories/date_poll_repository.rs
//
// Date poll list persistence

use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::DatePoll;
use crate::error::AppResult;
use crate::repositories::record_store::{self, DATE_POLL_LIST};

#[cfg_attr(test, mockall::automock)]
pub trait DatePollRepository: Send + Sync {
    fn load(&self) -> AppResult<Vec<DatePoll>>;
    fn save(&self, polls: &[DatePoll]) -> AppResult<()>;
}

pub struct SqliteDatePollRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteDatePollRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl DatePollRepository for SqliteDatePollRepository {
    fn load(&self) -> AppResult<Vec<DatePoll>> {
        let conn = get_connection(&self.pool)?;
        Ok(record_store::read_json(&conn, DATE_POLL_LIST)?.unwrap_or_default())
    }

    fn save(&self, polls: &[DatePoll]) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        record_store::write_json(&conn, DATE_POLL_LIST, polls)
    }
}
