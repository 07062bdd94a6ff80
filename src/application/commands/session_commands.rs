// src/application/commands/session_commands.rs
//
// Session Command Handlers
//
// The front end owns the Session value; these commands create it, forget
// it and report the nickname remembered from the last run.

use crate::application::{dto::SessionDto, error_handling::ToErrorResponse, state::AppState};
use crate::domain::Session;
use crate::error::AppError;

/// Enter a nickname. Returns the Session the caller should keep.
pub async fn set_nickname(state: &AppState, nickname: String) -> Result<Session, String> {
    state
        .session_service
        .set_nickname(&nickname)
        .map_err(|e| match e {
            AppError::Domain(inner) => AppError::Validation(inner.to_string()),
            other => other,
        })
        .to_error_response()
}

pub async fn clear_nickname(state: &AppState) -> Result<(), String> {
    state.session_service.clear();
    Ok(())
}

/// Nickname remembered on this installation, if any
pub async fn current_session(state: &AppState) -> Result<Option<SessionDto>, String> {
    Ok(state
        .session_service
        .restore()
        .as_ref()
        .map(SessionDto::from))
}
