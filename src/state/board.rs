use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::TeamEntity;

/// A competing team tracked by the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Stable identifier assigned at creation.
    pub id: Uuid,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Current score, unbounded and signed.
    pub score: i64,
}

/// Token identifying one armed undo window.
///
/// Every elimination bumps the token, so a deadline scheduled for an older
/// window can no longer clear the slot.
pub type UndoToken = u64;

/// Single-entry memory of the most recent elimination.
#[derive(Debug, Clone)]
struct UndoSlot {
    team: Team,
    token: UndoToken,
}

/// Result of [`Scoreboard::eliminate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationOutcome {
    /// The id was not active; nothing changed.
    NotActive,
    /// The team left the active roster but an entry with its id already
    /// existed on the eliminated roster, so that entry was kept as-is and no
    /// undo window was armed.
    AlreadyEliminated,
    /// The team moved to the eliminated roster; an undo window must be armed
    /// for the returned token.
    Armed(UndoToken),
}

/// Result of a successful [`Scoreboard::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// True when the restored team was the one referenced by the undo slot.
    /// The slot has been cleared and its deadline must be cancelled.
    pub undo_invalidated: bool,
}

/// Core scoreboard state: the active and eliminated rosters plus the
/// single-entry undo slot.
///
/// Purely synchronous; the undo deadline itself is scheduled by the
/// surrounding [`AppState`](crate::state::AppState). Rosters are keyed by
/// team id, and the eliminated roster's insertion order is the elimination
/// order shown to renderers.
#[derive(Debug, Default)]
pub struct Scoreboard {
    active: IndexMap<Uuid, Team>,
    eliminated: IndexMap<Uuid, Team>,
    undo: Option<UndoSlot>,
    next_token: UndoToken,
}

impl Scoreboard {
    /// Create an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a scoreboard from persisted rosters, enforcing id uniqueness.
    ///
    /// An id present in both rosters keeps its active entry; a duplicated id
    /// within one roster keeps the earliest entry.
    pub fn from_rosters(active: Vec<Team>, eliminated: Vec<Team>) -> Self {
        let mut board = Self::new();
        for team in active {
            board.active.entry(team.id).or_insert(team);
        }
        for team in eliminated {
            if !board.active.contains_key(&team.id) {
                board.eliminated.entry(team.id).or_insert(team);
            }
        }
        board
    }

    /// Teams still in play, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Team> {
        self.active.values()
    }

    /// Eliminated teams, in elimination order.
    pub fn eliminated(&self) -> impl Iterator<Item = &Team> {
        self.eliminated.values()
    }

    /// Team currently offered for one-step undo, if the window is open.
    pub fn undo_team(&self) -> Option<&Team> {
        self.undo.as_ref().map(|slot| &slot.team)
    }

    /// Whether any team is known under `id`, active or eliminated.
    pub fn contains(&self, id: Uuid) -> bool {
        self.active.contains_key(&id) || self.eliminated.contains_key(&id)
    }

    /// Register a new team with a zeroed score and return it.
    ///
    /// Names are trimmed; blank names are ignored.
    pub fn add_team(&mut self, name: &str) -> Option<&Team> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }

        let id = self.fresh_id();
        let team = Team {
            id,
            name: trimmed.to_owned(),
            score: 0,
        };
        Some(&*self.active.entry(id).or_insert(team))
    }

    /// Apply a signed delta to an active team's score.
    ///
    /// Unknown or eliminated ids are ignored. Returns whether a score changed.
    pub fn adjust_score(&mut self, id: Uuid, delta: i64) -> bool {
        match self.active.get_mut(&id) {
            Some(team) => {
                team.score += delta;
                true
            }
            None => false,
        }
    }

    /// Move an active team to the eliminated roster and open an undo window
    /// holding a snapshot of the team as it left play.
    pub fn eliminate(&mut self, id: Uuid) -> EliminationOutcome {
        let Some(team) = self.active.shift_remove(&id) else {
            return EliminationOutcome::NotActive;
        };

        if self.eliminated.contains_key(&id) {
            return EliminationOutcome::AlreadyEliminated;
        }

        let snapshot = team.clone();
        self.eliminated.insert(id, team);

        self.next_token += 1;
        self.undo = Some(UndoSlot {
            team: snapshot,
            token: self.next_token,
        });
        EliminationOutcome::Armed(self.next_token)
    }

    /// Clear the undo slot when the window identified by `token` is still the
    /// live one; stale tokens are ignored.
    ///
    /// The eliminated roster is untouched either way: only the undo
    /// affordance disappears.
    pub fn expire_undo(&mut self, token: UndoToken) -> bool {
        match &self.undo {
            Some(slot) if slot.token == token => {
                self.undo = None;
                true
            }
            _ => false,
        }
    }

    /// Reverse the most recent elimination while its undo window is open.
    ///
    /// Reinstates the snapshot held by the slot, so the team returns exactly
    /// as it left. Returns whether anything changed.
    pub fn undo_elimination(&mut self) -> bool {
        let Some(slot) = self.undo.take() else {
            return false;
        };

        let id = slot.team.id;
        self.eliminated.shift_remove(&id);
        if !self.active.contains_key(&id) {
            self.active.insert(id, slot.team);
        }
        true
    }

    /// Move an eliminated team back into play.
    ///
    /// When the restored team is the one held by the undo slot, the slot is
    /// cleared; a slot referencing a different still-eliminated team stays
    /// untouched.
    pub fn restore(&mut self, id: Uuid) -> Option<RestoreOutcome> {
        let team = self.eliminated.shift_remove(&id)?;
        if !self.active.contains_key(&id) {
            self.active.insert(id, team);
        }

        let undo_invalidated = self.undo.as_ref().is_some_and(|slot| slot.team.id == id);
        if undo_invalidated {
            self.undo = None;
        }
        Some(RestoreOutcome { undo_invalidated })
    }

    /// Drop every team and the undo slot.
    pub fn reset(&mut self) {
        self.active.clear();
        self.eliminated.clear();
        self.undo = None;
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.contains(id) {
                return id;
            }
        }
    }
}

impl From<TeamEntity> for Team {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            score: value.score,
        }
    }
}

impl From<&Team> for TeamEntity {
    fn from(value: &Team) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            score: value.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(board: &mut Scoreboard, name: &str) -> Uuid {
        board.add_team(name).map(|team| team.id).unwrap()
    }

    fn active_ids(board: &Scoreboard) -> Vec<Uuid> {
        board.active().map(|team| team.id).collect()
    }

    fn eliminated_ids(board: &Scoreboard) -> Vec<Uuid> {
        board.eliminated().map(|team| team.id).collect()
    }

    #[test]
    fn new_board_is_empty() {
        let board = Scoreboard::new();
        assert_eq!(board.active().count(), 0);
        assert_eq!(board.eliminated().count(), 0);
        assert!(board.undo_team().is_none());
    }

    #[test]
    fn add_team_trims_name_and_starts_at_zero() {
        let mut board = Scoreboard::new();
        let team = board.add_team("  Alpha  ").unwrap();
        assert_eq!(team.name, "Alpha");
        assert_eq!(team.score, 0);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut board = Scoreboard::new();
        assert!(board.add_team("").is_none());
        assert!(board.add_team("   ").is_none());
        assert_eq!(board.active().count(), 0);
    }

    #[test]
    fn adjust_score_accumulates_deltas() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");

        assert!(board.adjust_score(id, 5));
        assert!(board.adjust_score(id, 10));
        assert!(board.adjust_score(id, -5));
        assert_eq!(board.active().next().unwrap().score, 10);
    }

    #[test]
    fn adjust_score_ignores_unknown_ids() {
        let mut board = Scoreboard::new();
        add(&mut board, "Alpha");
        assert!(!board.adjust_score(Uuid::new_v4(), 5));
    }

    #[test]
    fn adjust_score_ignores_eliminated_teams() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        board.eliminate(id);

        assert!(!board.adjust_score(id, 5));
        assert_eq!(board.eliminated().next().unwrap().score, 0);
    }

    #[test]
    fn scores_can_go_negative() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        assert!(board.adjust_score(id, -15));
        assert_eq!(board.active().next().unwrap().score, -15);
    }

    #[test]
    fn eliminate_moves_team_and_arms_undo() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        board.adjust_score(id, 5);

        let outcome = board.eliminate(id);
        assert!(matches!(outcome, EliminationOutcome::Armed(_)));
        assert!(active_ids(&board).is_empty());
        assert_eq!(eliminated_ids(&board), vec![id]);

        let slot = board.undo_team().unwrap();
        assert_eq!(slot.id, id);
        assert_eq!(slot.score, 5);
    }

    #[test]
    fn eliminate_ignores_unknown_ids() {
        let mut board = Scoreboard::new();
        add(&mut board, "Alpha");

        assert_eq!(
            board.eliminate(Uuid::new_v4()),
            EliminationOutcome::NotActive
        );
        assert_eq!(board.active().count(), 1);
        assert!(board.undo_team().is_none());
    }

    #[test]
    fn eliminate_is_not_repeatable_for_the_same_id() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");

        board.eliminate(id);
        assert_eq!(board.eliminate(id), EliminationOutcome::NotActive);
        assert_eq!(board.eliminated().count(), 1);
    }

    #[test]
    fn each_elimination_gets_a_fresh_token() {
        let mut board = Scoreboard::new();
        let first = add(&mut board, "Alpha");
        let second = add(&mut board, "Bravo");

        let EliminationOutcome::Armed(token_a) = board.eliminate(first) else {
            panic!("expected armed undo window");
        };
        let EliminationOutcome::Armed(token_b) = board.eliminate(second) else {
            panic!("expected armed undo window");
        };
        assert_ne!(token_a, token_b);
    }

    #[test]
    fn a_new_elimination_overwrites_the_undo_slot() {
        let mut board = Scoreboard::new();
        let first = add(&mut board, "Alpha");
        let second = add(&mut board, "Bravo");

        board.eliminate(first);
        board.eliminate(second);

        assert_eq!(board.undo_team().unwrap().id, second);
        assert_eq!(eliminated_ids(&board), vec![first, second]);
    }

    #[test]
    fn expire_clears_slot_but_keeps_elimination() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        let EliminationOutcome::Armed(token) = board.eliminate(id) else {
            panic!("expected armed undo window");
        };

        assert!(board.expire_undo(token));
        assert!(board.undo_team().is_none());
        assert_eq!(eliminated_ids(&board), vec![id]);
        assert!(!board.undo_elimination());
    }

    #[test]
    fn stale_token_cannot_expire_a_newer_window() {
        let mut board = Scoreboard::new();
        let first = add(&mut board, "Alpha");
        let second = add(&mut board, "Bravo");

        let EliminationOutcome::Armed(stale) = board.eliminate(first) else {
            panic!("expected armed undo window");
        };
        board.eliminate(second);

        assert!(!board.expire_undo(stale));
        assert_eq!(board.undo_team().unwrap().id, second);
    }

    #[test]
    fn undo_restores_the_exact_team() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        board.adjust_score(id, 7);
        let before: Vec<Uuid> = eliminated_ids(&board);

        board.eliminate(id);
        assert!(board.undo_elimination());

        let team = board.active().next().unwrap();
        assert_eq!(team.id, id);
        assert_eq!(team.name, "Alpha");
        assert_eq!(team.score, 7);
        assert_eq!(eliminated_ids(&board), before);
        assert!(board.undo_team().is_none());
    }

    #[test]
    fn undo_without_a_slot_is_a_noop() {
        let mut board = Scoreboard::new();
        add(&mut board, "Alpha");
        assert!(!board.undo_elimination());
        assert_eq!(board.active().count(), 1);
    }

    #[test]
    fn restore_matches_undo_for_the_slot_team() {
        let mut board = Scoreboard::new();
        let id = add(&mut board, "Alpha");
        board.adjust_score(id, 3);
        board.eliminate(id);

        let outcome = board.restore(id).unwrap();
        assert!(outcome.undo_invalidated);
        assert_eq!(active_ids(&board), vec![id]);
        assert_eq!(board.active().next().unwrap().score, 3);
        assert!(board.undo_team().is_none());

        // Slot is gone, so the one-step undo no longer applies.
        assert!(!board.undo_elimination());
    }

    #[test]
    fn restore_of_an_unrelated_team_keeps_the_slot() {
        let mut board = Scoreboard::new();
        let first = add(&mut board, "Alpha");
        let second = add(&mut board, "Bravo");

        board.eliminate(first);
        board.eliminate(second);

        let outcome = board.restore(first).unwrap();
        assert!(!outcome.undo_invalidated);
        assert_eq!(board.undo_team().unwrap().id, second);

        // The slot still works for its own team.
        assert!(board.undo_elimination());
        assert!(board.contains(second));
        assert_eq!(board.eliminated().count(), 0);
    }

    #[test]
    fn restore_ignores_unknown_ids() {
        let mut board = Scoreboard::new();
        add(&mut board, "Alpha");
        assert!(board.restore(Uuid::new_v4()).is_none());
    }

    #[test]
    fn reset_drops_everything() {
        let mut board = Scoreboard::new();
        let first = add(&mut board, "Alpha");
        add(&mut board, "Bravo");
        board.eliminate(first);

        board.reset();
        assert_eq!(board.active().count(), 0);
        assert_eq!(board.eliminated().count(), 0);
        assert!(board.undo_team().is_none());
    }

    #[test]
    fn every_id_lives_in_exactly_one_roster() {
        let mut board = Scoreboard::new();
        let a = add(&mut board, "Alpha");
        let b = add(&mut board, "Bravo");
        let c = add(&mut board, "Charlie");

        board.eliminate(a);
        board.restore(a);
        board.eliminate(b);
        board.undo_elimination();
        board.eliminate(c);

        for id in [a, b, c] {
            let in_active = active_ids(&board).contains(&id);
            let in_eliminated = eliminated_ids(&board).contains(&id);
            assert!(in_active ^ in_eliminated, "id {id} must live in one roster");
        }

        // The slot team is always the current occupant of the eliminated roster.
        if let Some(slot) = board.undo_team() {
            assert!(eliminated_ids(&board).contains(&slot.id));
        }
    }

    #[test]
    fn from_rosters_prefers_the_active_entry_on_conflict() {
        let id = Uuid::new_v4();
        let active = vec![Team {
            id,
            name: "Alpha".into(),
            score: 4,
        }];
        let eliminated = vec![Team {
            id,
            name: "Alpha".into(),
            score: 9,
        }];

        let board = Scoreboard::from_rosters(active, eliminated);
        assert_eq!(board.active().next().unwrap().score, 4);
        assert_eq!(board.eliminated().count(), 0);
    }

    #[test]
    fn from_rosters_keeps_elimination_order() {
        let first = Team {
            id: Uuid::new_v4(),
            name: "Alpha".into(),
            score: 0,
        };
        let second = Team {
            id: Uuid::new_v4(),
            name: "Bravo".into(),
            score: 0,
        };

        let board = Scoreboard::from_rosters(Vec::new(), vec![first.clone(), second.clone()]);
        assert_eq!(eliminated_ids(&board), vec![first.id, second.id]);
    }
}
