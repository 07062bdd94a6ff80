// src/application/commands/date_commands.rs
//
// Date Poll Command Handlers

use crate::application::{
    dto::{DatePollDto, DateVoteDto},
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::Session;

/// Toggle availability on a `YYYY-MM-DD` date
pub async fn toggle_date_vote(
    state: &AppState,
    session: Option<&Session>,
    date: String,
) -> Result<DateVoteDto, String> {
    state
        .date_poll_service
        .toggle_date_vote(session, &date)
        .map(DateVoteDto::from)
        .to_error_response()
}

/// Dates ranked by votes, the leader flagged
pub async fn list_dates(
    state: &AppState,
    session: Option<&Session>,
) -> Result<Vec<DatePollDto>, String> {
    let ranked = state.date_poll_service.list_ranked();
    Ok(DatePollDto::ranked(&ranked, session))
}
