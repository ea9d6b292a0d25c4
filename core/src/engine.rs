//! The board engine — the heart of the scoreboard.
//!
//! RULES:
//!   - The engine exclusively owns the names map, the scores map, the
//!     roster order, and the timer. Nothing else mutates them.
//!   - Every mutating operation rewrites all three persisted keys in full
//!     before returning. No dirty state survives past a single command.
//!   - Roster order is display state only — it is never persisted. A
//!     reloaded board lists players in ascending id order, which equals
//!     the order they were added in (ids are allocated monotonically).
//!   - Ids are never reused within a session, even across removals.

use crate::{
    clock::MatchTimer,
    command::BoardCommand,
    error::BoardResult,
    event::BoardEvent,
    rng::ShuffleRng,
    snapshot::{self, TimerData, KEY_NAMES, KEY_SCORES, KEY_TIMER},
    store::BoardStore,
    types::{PlayerId, Score, Seconds},
};
use std::collections::HashMap;

/// What the rendering collaborator needs for one player: display name,
/// current score, and the leader highlight flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCard {
    pub id: PlayerId,
    pub name: String,
    pub score: Score,
    pub leader: bool,
}

pub struct BoardEngine {
    store: BoardStore,
    names: HashMap<PlayerId, String>,
    scores: HashMap<PlayerId, Score>,
    roster: Vec<PlayerId>,
    /// Highest id ever allocated this session. Seeded from the persisted
    /// maximum at load, so removing the top player never frees its id.
    high_water: PlayerId,
    timer: MatchTimer,
    rng: ShuffleRng,
}

impl BoardEngine {
    /// Load the board from the store and start with a paused timer.
    pub fn new(store: BoardStore) -> BoardResult<Self> {
        Self::with_rng(store, ShuffleRng::from_entropy())
    }

    /// Like `new`, with a caller-supplied shuffle RNG. Tests pass a fixed
    /// seed here to make shuffle order reproducible.
    pub fn with_rng(store: BoardStore, rng: ShuffleRng) -> BoardResult<Self> {
        let names: HashMap<PlayerId, String> =
            snapshot::decode_or_default(KEY_NAMES, store.get(KEY_NAMES)?);
        let mut scores: HashMap<PlayerId, Score> =
            snapshot::decode_or_default(KEY_SCORES, store.get(KEY_SCORES)?);
        let timer: TimerData = snapshot::decode_or_default(KEY_TIMER, store.get(KEY_TIMER)?);

        // Re-establish the names/scores correspondence against whatever the
        // store handed back: orphan scores are dropped, missing scores are
        // zero-filled.
        scores.retain(|id, _| names.contains_key(id));
        for id in names.keys() {
            scores.entry(*id).or_insert(0);
        }

        let mut roster: Vec<PlayerId> = names.keys().copied().collect();
        roster.sort_unstable();
        let high_water = roster.last().copied().unwrap_or(0);

        log::info!(
            "board loaded: {} players, timer at {}s",
            roster.len(),
            timer.elapsed
        );

        Ok(Self {
            store,
            names,
            scores,
            roster,
            high_water,
            timer: MatchTimer::paused_at(timer.elapsed),
            rng,
        })
    }

    // ── Command dispatch ───────────────────────────────────────

    /// The single entry point mapping user actions to operations.
    /// Returns the events the command produced; no-ops produce none.
    pub fn apply(&mut self, cmd: BoardCommand) -> BoardResult<Vec<BoardEvent>> {
        let events = match cmd {
            BoardCommand::AddPlayer => {
                let card = self.add_player()?;
                vec![BoardEvent::PlayerAdded {
                    id: card.id,
                    name: card.name,
                }]
            }
            BoardCommand::RemovePlayer { id } => {
                if self.remove_player(id)? {
                    vec![BoardEvent::PlayerRemoved { id }]
                } else {
                    vec![]
                }
            }
            BoardCommand::RecordScore { id, raw } => match self.record_score(id, &raw)? {
                Some(total) => vec![BoardEvent::ScoreRecorded { id, total }],
                None => vec![],
            },
            BoardCommand::ClearScore { id } => {
                if self.clear_score(id)? {
                    vec![BoardEvent::ScoreCleared { id }]
                } else {
                    vec![]
                }
            }
            BoardCommand::RenamePlayer { id, raw } => match self.rename_player(id, &raw)? {
                Some(name) => vec![BoardEvent::PlayerRenamed { id, name }],
                None => vec![],
            },
            BoardCommand::ResetAllScores => {
                let players = self.reset_all_scores()?;
                vec![BoardEvent::ScoresReset { players }]
            }
            BoardCommand::SortDescending => vec![BoardEvent::RosterSorted {
                order: self.sort_descending().to_vec(),
            }],
            BoardCommand::Shuffle => vec![BoardEvent::RosterShuffled {
                order: self.shuffle().to_vec(),
            }],
            BoardCommand::ToggleTimer => {
                let elapsed = self.timer.elapsed;
                if self.toggle_timer() {
                    vec![BoardEvent::TimerStarted { elapsed }]
                } else {
                    vec![BoardEvent::TimerStopped { elapsed }]
                }
            }
            BoardCommand::ResetTimer => {
                self.reset_timer()?;
                vec![BoardEvent::TimerReset]
            }
        };

        for event in &events {
            log::debug!("event {}", event.type_name());
        }
        Ok(events)
    }

    // ── Roster operations ──────────────────────────────────────

    /// Allocate the next id, create a player with the default name and a
    /// zero score, and append it to the end of the roster.
    pub fn add_player(&mut self) -> BoardResult<PlayerCard> {
        self.high_water += 1;
        let id = self.high_water;
        let name = format!("Player {id}");

        self.names.insert(id, name.clone());
        self.scores.insert(id, 0);
        self.roster.push(id);
        self.persist()?;

        log::info!("added player {id}");
        Ok(PlayerCard {
            id,
            name,
            score: 0,
            leader: false,
        })
    }

    /// Delete the player's name, score, and roster slot together.
    /// Removing an id that is not on the board is a no-op; returns whether
    /// anything was removed.
    pub fn remove_player(&mut self, id: PlayerId) -> BoardResult<bool> {
        if self.names.remove(&id).is_none() {
            return Ok(false);
        }
        self.scores.remove(&id);
        self.roster.retain(|&p| p != id);
        self.persist()?;

        log::info!("removed player {id}");
        Ok(true)
    }

    /// Trim the raw name; an empty result falls back to `"Player {id}"`.
    /// Returns the final name, or `None` for an unknown id.
    pub fn rename_player(&mut self, id: PlayerId, raw: &str) -> BoardResult<Option<String>> {
        if !self.names.contains_key(&id) {
            return Ok(None);
        }
        let trimmed = raw.trim();
        let name = if trimmed.is_empty() {
            format!("Player {id}")
        } else {
            trimmed.to_string()
        };
        self.names.insert(id, name.clone());
        self.persist()?;
        Ok(Some(name))
    }

    // ── Scoring operations ─────────────────────────────────────

    /// Add the parsed delta to the player's total. Non-numeric or negative
    /// input clamps to zero. Returns the new total, or `None` for an
    /// unknown id.
    pub fn record_score(&mut self, id: PlayerId, raw: &str) -> BoardResult<Option<Score>> {
        if !self.names.contains_key(&id) {
            return Ok(None);
        }
        let delta = raw.trim().parse::<Score>().unwrap_or(0).max(0);
        let total = self.scores.get(&id).copied().unwrap_or(0) + delta;
        self.scores.insert(id, total);
        self.persist()?;
        Ok(Some(total))
    }

    /// Set the player's score to exactly zero. Returns whether the id was
    /// on the board.
    pub fn clear_score(&mut self, id: PlayerId) -> BoardResult<bool> {
        if !self.names.contains_key(&id) {
            return Ok(false);
        }
        self.scores.insert(id, 0);
        self.persist()?;
        Ok(true)
    }

    /// Zero every score in one step. Returns how many players were reset.
    /// Confirmation is the UI's job; the engine does not ask.
    pub fn reset_all_scores(&mut self) -> BoardResult<usize> {
        for score in self.scores.values_mut() {
            *score = 0;
        }
        self.persist()?;
        Ok(self.scores.len())
    }

    /// The highlight set: every id whose score equals the maximum, only
    /// when that maximum is above zero. Ties are all flagged — there is no
    /// single-winner semantic. Returned in roster order.
    pub fn leaders(&self) -> Vec<PlayerId> {
        let max = self.scores.values().copied().max().unwrap_or(0);
        if max <= 0 {
            return Vec::new();
        }
        self.roster
            .iter()
            .copied()
            .filter(|id| self.scores.get(id) == Some(&max))
            .collect()
    }

    // ── Ordering operations ────────────────────────────────────

    /// Stable sort of the roster by score descending; tied players keep
    /// their prior relative order. Order is not persisted.
    pub fn sort_descending(&mut self) -> &[PlayerId] {
        let scores = &self.scores;
        self.roster
            .sort_by_key(|id| std::cmp::Reverse(scores.get(id).copied().unwrap_or(0)));
        &self.roster
    }

    /// Unbiased random permutation of the roster. Order is not persisted.
    pub fn shuffle(&mut self) -> &[PlayerId] {
        self.rng.shuffle(&mut self.roster);
        &self.roster
    }

    // ── Timer operations ───────────────────────────────────────

    /// One second elapsed. Ignored while the timer is paused, so a tick
    /// already in flight when the timer stops changes nothing.
    pub fn tick(&mut self) -> BoardResult<Option<Seconds>> {
        let Some(elapsed) = self.timer.tick() else {
            return Ok(None);
        };
        self.persist()?;
        Ok(Some(elapsed))
    }

    /// Flip the running state and return the new one. The running flag is
    /// transient, so nothing is persisted here; scheduling or cancelling
    /// the periodic tick source is the caller's job.
    pub fn toggle_timer(&mut self) -> bool {
        self.timer.toggle()
    }

    /// Stop the timer and zero it.
    pub fn reset_timer(&mut self) -> BoardResult<()> {
        self.timer.reset();
        self.persist()
    }

    // ── Render model ───────────────────────────────────────────

    /// The card list in roster order, leader flags included.
    pub fn cards(&self) -> Vec<PlayerCard> {
        let max = self.scores.values().copied().max().unwrap_or(0);
        self.roster
            .iter()
            .map(|&id| {
                let score = self.scores.get(&id).copied().unwrap_or(0);
                PlayerCard {
                    id,
                    name: self
                        .names
                        .get(&id)
                        .cloned()
                        .unwrap_or_else(|| format!("Player {id}")),
                    score,
                    leader: max > 0 && score == max,
                }
            })
            .collect()
    }

    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    pub fn timer(&self) -> &MatchTimer {
        &self.timer
    }

    /// Read-only handle to the persistence collaborator. Tooling and tests
    /// inspect persisted keys through this; mutation stays in the engine.
    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    // ── Persistence ────────────────────────────────────────────

    /// Full re-serialization of all three keys, not incremental.
    fn persist(&self) -> BoardResult<()> {
        self.store.put(KEY_SCORES, &snapshot::encode(&self.scores)?)?;
        self.store.put(KEY_NAMES, &snapshot::encode(&self.names)?)?;
        self.store.put(
            KEY_TIMER,
            &snapshot::encode(&TimerData {
                elapsed: self.timer.elapsed,
            })?,
        )?;
        Ok(())
    }
}
