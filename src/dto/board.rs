use serde::Serialize;
use uuid::Uuid;

use crate::state::board::Scoreboard;

/// Full scoreboard view published after every command.
///
/// This structure is the sole contract toward UI layers: commands return it
/// and the snapshot watcher re-emits it on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Teams still in play, ordered by score descending then name ascending.
    pub active: Vec<ActiveTeamSummary>,
    /// Eliminated teams, in elimination order.
    pub eliminated: Vec<EliminatedTeamSummary>,
    /// One-step undo affordance, present while an undo window is open.
    pub undo: Option<UndoSummary>,
}

/// Projection of a team still in play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveTeamSummary {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: i64,
    /// True when this team's score equals the maximum active score; every
    /// tied team is flagged.
    pub is_top_scorer: bool,
}

/// Projection of an eliminated team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminatedTeamSummary {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Score the team held when it was eliminated.
    pub score: i64,
}

/// Data for rendering an "undo eliminate" control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoSummary {
    /// Id of the team the undo would reinstate.
    pub team_id: Uuid,
    /// Name of the team the undo would reinstate.
    pub team_name: String,
}

impl From<&Scoreboard> for BoardSnapshot {
    fn from(board: &Scoreboard) -> Self {
        let top_score = board.active().map(|team| team.score).max();

        let mut active: Vec<ActiveTeamSummary> = board
            .active()
            .map(|team| ActiveTeamSummary {
                id: team.id,
                name: team.name.clone(),
                score: team.score,
                is_top_scorer: Some(team.score) == top_score,
            })
            .collect();
        active.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));

        let eliminated = board
            .eliminated()
            .map(|team| EliminatedTeamSummary {
                id: team.id,
                name: team.name.clone(),
                score: team.score,
            })
            .collect();

        let undo = board.undo_team().map(|team| UndoSummary {
            team_id: team.id,
            team_name: team.name.clone(),
        });

        Self {
            active,
            eliminated,
            undo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(names_and_scores: &[(&str, i64)]) -> Scoreboard {
        let mut board = Scoreboard::new();
        for (name, score) in names_and_scores {
            let id = board.add_team(name).map(|team| team.id).unwrap();
            board.adjust_score(id, *score);
        }
        board
    }

    #[test]
    fn active_teams_sort_by_score_then_name() {
        let board = board_with(&[("Charlie", 5), ("Alpha", 10), ("Bravo", 10)]);
        let snapshot = BoardSnapshot::from(&board);

        let names: Vec<&str> = snapshot
            .active
            .iter()
            .map(|team| team.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn every_tied_leader_is_flagged() {
        let board = board_with(&[("Alpha", 10), ("Bravo", 10), ("Charlie", 5)]);
        let snapshot = BoardSnapshot::from(&board);

        let flags: Vec<bool> = snapshot
            .active
            .iter()
            .map(|team| team.is_top_scorer)
            .collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn equal_scores_flag_everyone() {
        let board = board_with(&[("Alpha", 0), ("Bravo", 0)]);
        let snapshot = BoardSnapshot::from(&board);
        assert!(snapshot.active.iter().all(|team| team.is_top_scorer));
    }

    #[test]
    fn empty_board_flags_nobody() {
        let snapshot = BoardSnapshot::from(&Scoreboard::new());
        assert!(snapshot.active.is_empty());
        assert!(snapshot.eliminated.is_empty());
        assert!(snapshot.undo.is_none());
    }

    #[test]
    fn eliminated_teams_keep_elimination_order() {
        let mut board = board_with(&[("Alpha", 1), ("Bravo", 2), ("Charlie", 3)]);
        let ids: Vec<Uuid> = board.active().map(|team| team.id).collect();

        board.eliminate(ids[2]);
        board.eliminate(ids[0]);

        let snapshot = BoardSnapshot::from(&board);
        let names: Vec<&str> = snapshot
            .eliminated
            .iter()
            .map(|team| team.name.as_str())
            .collect();
        assert_eq!(names, vec!["Charlie", "Alpha"]);
    }

    #[test]
    fn undo_summary_carries_the_slot_team_name() {
        let mut board = board_with(&[("Alpha", 1)]);
        let id = board.active().next().map(|team| team.id).unwrap();
        board.eliminate(id);

        let snapshot = BoardSnapshot::from(&board);
        let undo = snapshot.undo.unwrap();
        assert_eq!(undo.team_id, id);
        assert_eq!(undo.team_name, "Alpha");
    }
}
