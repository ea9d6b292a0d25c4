//! scoreboard-core: the state engine behind the scoreboard.
//!
//! The engine owns the player roster, per-player scores, and the match
//! timer; mutates them only through the command set in `command`; derives
//! the render model (cards with leader flags) after every mutation; and
//! rewrites the persisted representation after every mutating action so a
//! restart reconstructs identical state.

pub mod clock;
pub mod command;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod types;
