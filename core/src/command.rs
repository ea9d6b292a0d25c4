use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// All user-issued board actions.
/// One variant per control the rendering collaborator exposes; the engine's
/// `apply` is the single dispatch point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BoardCommand {
    AddPlayer,
    RemovePlayer { id: PlayerId },

    /// `raw` is the untouched text from the score input field. Parsing and
    /// clamping happen in the engine, not at the UI boundary.
    RecordScore { id: PlayerId, raw: String },
    ClearScore { id: PlayerId },

    /// `raw` is the untouched text from the name field; trimming and the
    /// default-name fallback happen in the engine.
    RenamePlayer { id: PlayerId, raw: String },

    /// The UI must ask for confirmation before issuing this.
    ResetAllScores,

    SortDescending,
    Shuffle,

    ToggleTimer,
    ResetTimer,
}
