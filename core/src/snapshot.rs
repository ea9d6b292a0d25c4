//! The persisted wire format — board state to/from JSON.
//!
//! Three keys, each holding one JSON-encoded structure. Player ids appear
//! as their canonical decimal text form (JSON object keys are strings).
//! Decoding is tolerant per key: an absent or malformed value yields that
//! key's default alone and never blocks the other keys from loading.

use crate::{error::BoardResult, types::Seconds};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const KEY_SCORES: &str = "scores";
pub const KEY_NAMES: &str = "playerNames";
pub const KEY_TIMER: &str = "timerData";

/// The persisted timer state. The running flag is intentionally absent —
/// a reloaded board always starts paused.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerData {
    pub elapsed: Seconds,
}

pub fn encode<T: Serialize>(value: &T) -> BoardResult<String> {
    serde_json::to_string(value).map_err(Into::into)
}

/// Decode a persisted value, substituting the default when the key was
/// never written or its content does not parse.
pub fn decode_or_default<T>(key: &str, raw: Option<String>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(text) = raw else {
        return T::default();
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("{key}: discarding malformed persisted value: {err}");
            T::default()
        }
    }
}
