//! State Snapshots
//!
//! Read-only copies of the session state handed to observers after every
//! applied event. Serialized as JSON for debugging ease, matching what
//! persistence observers write to disk.

use serde::{Serialize, Deserialize};

use crate::session::state::PlayerKey;

/// One player's statistics as seen by observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Persistent key of this player.
    pub key: PlayerKey,
    /// Display name at snapshot time.
    pub name: String,
    /// Kills this round (can be negative after self-inflicted deaths).
    pub kills: i32,
    /// Deaths this round.
    pub deaths: u32,
    /// Dotted-quad address from the join line, when present.
    pub address: Option<String>,
}

/// Immutable view of the whole session at one point in time.
///
/// Players are ordered by key. The snapshot shares nothing with the live
/// state, so observers can hold it across events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Name of the map currently being played.
    pub map: String,
    /// All registered players, ordered by key.
    pub players: Vec<PlayerSnapshot>,
}

impl StateSnapshot {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up one player in the snapshot.
    pub fn player(&self, key: &PlayerKey) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| &p.key == key)
    }
}
