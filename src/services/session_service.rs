// src/services/session_service.rs
//
// Nickname handling. The session itself is a value owned by the caller;
// this service only remembers the last nickname for the next start.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::Session;
use crate::error::AppResult;
use crate::events::{EventBus, NicknameCleared, NicknameSet};
use crate::repositories::SessionRepository;

pub struct SessionService {
    session_repo: Arc<dyn SessionRepository>,
    event_bus: Arc<EventBus>,
}

impl SessionService {
    pub fn new(session_repo: Arc<dyn SessionRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            session_repo,
            event_bus,
        }
    }

    /// Nickname remembered from the last run, if any
    pub fn restore(&self) -> Option<Session> {
        match self.session_repo.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Stored nickname could not be read: {}", e);
                None
            }
        }
    }

    pub fn set_nickname(&self, raw_nickname: &str) -> AppResult<Session> {
        let session = Session::new(raw_nickname)?;

        if let Err(e) = self.session_repo.save(&session) {
            warn!("Failed to persist nickname: {}", e);
        }

        info!("Nickname set to {}", session);
        self.event_bus.emit(NicknameSet::new(session.nickname().to_string()));

        Ok(session)
    }

    pub fn clear(&self) {
        if let Err(e) = self.session_repo.clear() {
            warn!("Failed to forget nickname: {}", e);
        }

        info!("Nickname cleared");
        self.event_bus.emit(NicknameCleared::new());
    }
}
