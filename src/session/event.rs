//! Domain Events
//!
//! Typed events extracted from raw log lines. Each event is created once by
//! the extractor and consumed exactly once by the session state store.

use serde::{Serialize, Deserialize};
use crate::session::state::PlayerKey;

/// A discrete event recognized in one server log line.
///
/// Lines that match none of the recognizers produce no event at all, so
/// there is no "unknown" variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    /// A player connected to the server.
    Joined {
        /// Persistent key of the connecting player.
        key: PlayerKey,
        /// Display name at connect time.
        name: String,
        /// Dotted-quad address, if the line carried one.
        address: Option<String>,
    },

    /// A player disconnected from the server.
    Left {
        /// Persistent key of the departing player.
        key: PlayerKey,
    },

    /// One player killed another.
    Killed {
        /// Key of the player credited with the kill.
        killer: PlayerKey,
        /// Key of the player who died.
        victim: PlayerKey,
    },

    /// A player died without a living killer.
    SelfKilled {
        /// Key of the player who died.
        key: PlayerKey,
        /// True when the environment caused the death rather than the
        /// player's own action (falls, drowning, trigger_hurt).
        by_world: bool,
    },

    /// A player changed display name mid-session.
    Renamed {
        /// Key of the renaming player.
        key: PlayerKey,
        /// The new display name.
        new_name: String,
    },

    /// The server loaded a new map, starting a new scoring round.
    MapChanged {
        /// Name of the map that just started.
        map: String,
    },
}

impl LogEvent {
    /// Short stable label for logging and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::Joined { .. } => "joined",
            LogEvent::Left { .. } => "left",
            LogEvent::Killed { .. } => "killed",
            LogEvent::SelfKilled { .. } => "self_killed",
            LogEvent::Renamed { .. } => "renamed",
            LogEvent::MapChanged { .. } => "map_changed",
        }
    }

    /// Key of the player the event is primarily about, if any.
    ///
    /// For kills this is the killer; map changes concern no single player.
    pub fn subject(&self) -> Option<&PlayerKey> {
        match self {
            LogEvent::Joined { key, .. } => Some(key),
            LogEvent::Left { key } => Some(key),
            LogEvent::Killed { killer, .. } => Some(killer),
            LogEvent::SelfKilled { key, .. } => Some(key),
            LogEvent::Renamed { key, .. } => Some(key),
            LogEvent::MapChanged { .. } => None,
        }
    }
}
