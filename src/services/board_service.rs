//! Business logic powering the scoreboard commands. These helpers coordinate
//! in-memory state updates, the undo deadline, and best-effort persistence;
//! each returns the fresh snapshot the caller should render.

use tracing::debug;
use uuid::Uuid;

use crate::{
    dto::board::BoardSnapshot,
    services::{confirm::ConfirmationPrompt, persistence},
    state::{AppState, SharedState, board::EliminationOutcome},
};

/// Confirmation message shown before a full reset.
pub const RESET_PROMPT: &str = "Reset all teams and eliminated data? This will clear stored data.";

/// Register a new team with a zeroed score.
///
/// Names are trimmed; blank names leave the board unchanged.
pub async fn add_team(state: &SharedState, name: &str) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    let added = board.add_team(name).map(|team| team.id);
    if let Some(id) = added {
        debug!(team = %id, "team added");
        persistence::save_rosters(state, &board).await;
    }
    state.publish_snapshot(&board)
}

/// Apply a signed delta to an active team's score.
///
/// Unknown or eliminated ids leave the board unchanged.
pub async fn adjust_score(state: &SharedState, id: Uuid, delta: i64) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    if board.adjust_score(id, delta) {
        persistence::save_rosters(state, &board).await;
    }
    state.publish_snapshot(&board)
}

/// Move an active team to the eliminated roster and open its undo window.
pub async fn eliminate_team(state: &SharedState, id: Uuid) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    match board.eliminate(id) {
        EliminationOutcome::NotActive => {}
        EliminationOutcome::AlreadyEliminated => {
            persistence::save_rosters(state, &board).await;
        }
        EliminationOutcome::Armed(token) => {
            debug!(team = %id, token, "team eliminated; undo window armed");
            persistence::save_rosters(state, &board).await;
            AppState::arm_undo_deadline(state, token).await;
        }
    }
    state.publish_snapshot(&board)
}

/// Reverse the most recent elimination while its undo window is open.
pub async fn undo_last_elimination(state: &SharedState) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    if board.undo_elimination() {
        debug!("elimination undone");
        state.cancel_undo_deadline().await;
        persistence::save_rosters(state, &board).await;
    }
    state.publish_snapshot(&board)
}

/// Bring an eliminated team back into play.
///
/// Restoring the team held by the undo slot also closes the undo window; a
/// slot referencing a different team is left alone.
pub async fn restore_team(state: &SharedState, id: Uuid) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    if let Some(outcome) = board.restore(id) {
        debug!(team = %id, undo_invalidated = outcome.undo_invalidated, "team restored");
        if outcome.undo_invalidated {
            state.cancel_undo_deadline().await;
        }
        persistence::save_rosters(state, &board).await;
    }
    state.publish_snapshot(&board)
}

/// Wipe the scoreboard and erase the persisted rosters, after confirmation.
///
/// A declined prompt leaves every piece of state untouched.
pub async fn reset_all(state: &SharedState, prompt: &dyn ConfirmationPrompt) -> BoardSnapshot {
    let mut board = state.board().lock().await;
    if !prompt.confirm(RESET_PROMPT) {
        debug!("reset declined");
        return state.publish_snapshot(&board);
    }

    board.reset();
    state.cancel_undo_deadline().await;
    persistence::clear_rosters(state).await;
    debug!("scoreboard reset");
    state.publish_snapshot(&board)
}

/// Current read-only view of the scoreboard.
pub async fn snapshot(state: &SharedState) -> BoardSnapshot {
    let board = state.board().lock().await;
    BoardSnapshot::from(&*board)
}
