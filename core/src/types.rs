//! Shared primitive types used across the entire scoreboard.

/// A player identifier. Allocated monotonically, never reused in a session.
pub type PlayerId = u64;

/// A player's running score. Non-negative by construction (deltas are
/// clamped before they are applied), unbounded above.
pub type Score = i64;

/// Elapsed match time in whole seconds.
pub type Seconds = u64;
