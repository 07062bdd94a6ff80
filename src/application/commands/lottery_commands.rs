// src/application/commands/lottery_commands.rs
//
// Lottery Command Handlers
//
// start_draw resolves when the winner is announced. Front ends that animate
// subscribe to DrawHighlightMoved on the event bus.

use crate::application::{
    dto::{DrawResultDto, LotteryStateDto},
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::Session;

pub async fn start_draw(
    state: &AppState,
    session: Option<&Session>,
) -> Result<DrawResultDto, String> {
    state
        .lottery_service
        .start_draw()
        .await
        .map(|outcome| DrawResultDto::for_viewer(outcome, session))
        .to_error_response()
}

/// Hide the result; the winner stays readable
pub async fn close_result(
    state: &AppState,
    session: Option<&Session>,
) -> Result<LotteryStateDto, String> {
    let lottery = state.lottery_service.close_result();
    Ok(LotteryStateDto::for_viewer(&lottery, session))
}

pub async fn lottery_state(
    state: &AppState,
    session: Option<&Session>,
) -> Result<LotteryStateDto, String> {
    let lottery = state.lottery_service.state();
    Ok(LotteryStateDto::for_viewer(&lottery, session))
}
