//! Events emitted by the engine — all the rendering collaborator sees.
//!
//! RULE: The renderer reacts to events and the derived card list.
//! It never reads or mutates the engine's maps directly.

use crate::types::{PlayerId, Score, Seconds};
use serde::{Deserialize, Serialize};

/// One observable state change per variant. A command that turns out to be
/// a no-op (unknown id, tick while paused) produces no event at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    PlayerAdded { id: PlayerId, name: String },
    PlayerRemoved { id: PlayerId },
    ScoreRecorded { id: PlayerId, total: Score },
    ScoreCleared { id: PlayerId },
    PlayerRenamed { id: PlayerId, name: String },
    ScoresReset { players: usize },

    RosterSorted { order: Vec<PlayerId> },
    RosterShuffled { order: Vec<PlayerId> },

    TimerStarted { elapsed: Seconds },
    TimerStopped { elapsed: Seconds },
    TimerTicked { elapsed: Seconds },
    TimerReset,
}

impl BoardEvent {
    /// Stable string name for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PlayerAdded { .. } => "player_added",
            Self::PlayerRemoved { .. } => "player_removed",
            Self::ScoreRecorded { .. } => "score_recorded",
            Self::ScoreCleared { .. } => "score_cleared",
            Self::PlayerRenamed { .. } => "player_renamed",
            Self::ScoresReset { .. } => "scores_reset",
            Self::RosterSorted { .. } => "roster_sorted",
            Self::RosterShuffled { .. } => "roster_shuffled",
            Self::TimerStarted { .. } => "timer_started",
            Self::TimerStopped { .. } => "timer_stopped",
            Self::TimerTicked { .. } => "timer_ticked",
            Self::TimerReset => "timer_reset",
        }
    }
}
