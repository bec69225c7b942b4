pub mod board;

use std::{sync::Arc, time::Duration};

use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::{config::AppConfig, dao::roster_store::RosterStore, dto::board::BoardSnapshot};

pub use self::board::{EliminationOutcome, RestoreOutcome, Scoreboard, Team, UndoToken};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state owning the scoreboard, the pending undo
/// deadline, and the installed roster store.
pub struct AppState {
    board: Mutex<Scoreboard>,
    undo_deadline: Mutex<Option<JoinHandle<()>>>,
    roster_store: RwLock<Option<Arc<dyn RosterStore>>>,
    snapshots: watch::Sender<BoardSnapshot>,
    undo_window: Duration,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The board starts empty; call
    /// [`services::persistence::hydrate`](crate::services::persistence::hydrate)
    /// after installing a store to pick up persisted rosters.
    pub fn new(config: &AppConfig) -> SharedState {
        let (snapshots, _rx) = watch::channel(BoardSnapshot::default());
        Arc::new(Self {
            board: Mutex::new(Scoreboard::new()),
            undo_deadline: Mutex::new(None),
            roster_store: RwLock::new(None),
            snapshots,
            undo_window: config.undo_window(),
        })
    }

    /// Obtain a handle to the installed roster store, if any.
    pub async fn roster_store(&self) -> Option<Arc<dyn RosterStore>> {
        let guard = self.roster_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install the roster store used for best-effort persistence.
    pub async fn install_roster_store(&self, store: Arc<dyn RosterStore>) {
        let mut guard = self.roster_store.write().await;
        *guard = Some(store);
    }

    /// Remove the current roster store; the scoreboard keeps operating in memory.
    pub async fn clear_roster_store(&self) {
        let mut guard = self.roster_store.write().await;
        guard.take();
    }

    /// Scoreboard guarded by the command serialization lock.
    ///
    /// Commands hold this lock for their whole update, so operations execute
    /// atomically with respect to each other and to the undo deadline.
    pub fn board(&self) -> &Mutex<Scoreboard> {
        &self.board
    }

    /// Subscribe to the snapshots published after every state change.
    pub fn snapshot_watcher(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.subscribe()
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Build a fresh snapshot from `board`, publish it to watchers, and return it.
    pub(crate) fn publish_snapshot(&self, board: &Scoreboard) -> BoardSnapshot {
        let snapshot = BoardSnapshot::from(board);
        let _ = self.snapshots.send(snapshot.clone());
        snapshot
    }

    /// Replace any pending undo deadline with a fresh one for `token`.
    ///
    /// When the deadline fires unchallenged, the undo slot is cleared and the
    /// resulting snapshot is published. Operations that close the window call
    /// [`cancel_undo_deadline`](Self::cancel_undo_deadline) instead; the
    /// token match inside the board makes a lost race harmless.
    pub(crate) async fn arm_undo_deadline(state: &SharedState, token: UndoToken) {
        let mut pending = state.undo_deadline.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let task_state = Arc::clone(state);
        *pending = Some(tokio::spawn(async move {
            sleep(task_state.undo_window).await;
            task_state.expire_undo(token).await;
        }));
    }

    /// Cancel the pending undo deadline, if one is armed.
    pub(crate) async fn cancel_undo_deadline(&self) {
        if let Some(handle) = self.undo_deadline.lock().await.take() {
            handle.abort();
        }
    }

    async fn expire_undo(&self, token: UndoToken) {
        let mut board = self.board.lock().await;
        if board.expire_undo(token) {
            debug!(token, "undo window elapsed; elimination is now permanent");
            self.publish_snapshot(&board);
        }
    }
}
