// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{LotteryTiming, RandomSource};
use crate::events::EventBus;
use crate::infrastructure::Ticker;
use crate::integrations::MetadataProvider;
use crate::repositories::{SqliteDatePollRepository, SqliteMovieRepository, SqliteSessionRepository};
use crate::services::{DatePollService, LookupService, LotteryService, MovieService, SessionService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for sharing across tasks.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub session_service: Arc<SessionService>,
    pub movie_service: Arc<MovieService>,
    pub date_poll_service: Arc<DatePollService>,
    pub lottery_service: Arc<LotteryService>,
}

impl AppState {
    /// Wire repositories and services over an initialized database
    pub fn assemble(
        pool: Arc<ConnectionPool>,
        provider: Arc<dyn MetadataProvider>,
        ticker: Arc<dyn Ticker>,
        random: Box<dyn RandomSource>,
        timing: LotteryTiming,
    ) -> Self {
        let event_bus = Arc::new(crate::events::create_event_bus());

        // Repositories
        let session_repo = Arc::new(SqliteSessionRepository::new(pool.clone()));
        let movie_repo = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let date_poll_repo = Arc::new(SqliteDatePollRepository::new(pool));

        // Services
        let lookup_service = Arc::new(LookupService::new(provider));
        let session_service = Arc::new(SessionService::new(session_repo, event_bus.clone()));
        let movie_service = Arc::new(MovieService::new(
            movie_repo,
            lookup_service,
            event_bus.clone(),
        ));
        let date_poll_service = Arc::new(DatePollService::new(date_poll_repo, event_bus.clone()));
        let lottery_service = Arc::new(LotteryService::new(
            movie_service.clone(),
            ticker,
            random,
            event_bus.clone(),
            timing,
        ));

        Self {
            event_bus,
            session_service,
            movie_service,
            date_poll_service,
            lottery_service,
        }
    }
}
