//! Best-effort roster persistence: every state change schedules a save, and
//! failures are logged and swallowed so the in-memory board stays
//! authoritative.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    dao::{models::TeamEntity, roster_store::RosterStore},
    dto::board::BoardSnapshot,
    state::{
        SharedState,
        board::{Scoreboard, Team},
    },
};

/// Store key holding the active roster.
pub const ACTIVE_ROSTER_KEY: &str = "score-tracker:teams";
/// Store key holding the eliminated roster.
pub const ELIMINATED_ROSTER_KEY: &str = "score-tracker:eliminated";

/// Load both rosters from the installed store and seed the board with them.
///
/// Missing or malformed payloads degrade to empty rosters. Returns the
/// snapshot published after seeding.
pub async fn hydrate(state: &SharedState) -> BoardSnapshot {
    let Some(store) = state.roster_store().await else {
        let board = state.board().lock().await;
        return state.publish_snapshot(&board);
    };

    let active = load_roster(&store, ACTIVE_ROSTER_KEY).await;
    let eliminated = load_roster(&store, ELIMINATED_ROSTER_KEY).await;

    let mut board = state.board().lock().await;
    *board = Scoreboard::from_rosters(active, eliminated);
    info!(
        active = board.active().count(),
        eliminated = board.eliminated().count(),
        "rosters hydrated from store"
    );
    state.publish_snapshot(&board)
}

/// Schedule a save of both rosters under their store keys.
///
/// The writes run on detached tasks so commands never wait on storage.
pub(crate) async fn save_rosters(state: &SharedState, board: &Scoreboard) {
    let Some(store) = state.roster_store().await else {
        return;
    };

    spawn_save(
        &store,
        ACTIVE_ROSTER_KEY,
        board.active().map(TeamEntity::from).collect(),
    );
    spawn_save(
        &store,
        ELIMINATED_ROSTER_KEY,
        board.eliminated().map(TeamEntity::from).collect(),
    );
}

/// Erase both persisted rosters, best-effort.
pub(crate) async fn clear_rosters(state: &SharedState) {
    let Some(store) = state.roster_store().await else {
        return;
    };

    for key in [ACTIVE_ROSTER_KEY, ELIMINATED_ROSTER_KEY] {
        let remove = store.remove(key);
        tokio::spawn(async move {
            if let Err(err) = remove.await {
                warn!(key, error = %err, "failed to erase persisted roster");
            }
        });
    }
}

fn spawn_save(store: &Arc<dyn RosterStore>, key: &'static str, roster: Vec<TeamEntity>) {
    let payload = match serde_json::to_string(&roster) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(key, error = %err, "failed to encode roster; skipping save");
            return;
        }
    };

    let save = store.save(key, payload);
    tokio::spawn(async move {
        if let Err(err) = save.await {
            warn!(key, error = %err, "roster save failed; continuing in memory");
        }
    });
}

async fn load_roster(store: &Arc<dyn RosterStore>, key: &str) -> Vec<Team> {
    let payload = match store.load(key).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key, error = %err, "failed to load persisted roster; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<TeamEntity>>(&payload) {
        Ok(entities) => entities.into_iter().map(Team::from).collect(),
        Err(err) => {
            warn!(key, error = %err, "persisted roster is corrupt; starting empty");
            Vec::new()
        }
    }
}
