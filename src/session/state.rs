//! Session State Definitions
//!
//! Per-player statistics for the current map, keyed by the persistent
//! player key. Uses BTreeMap so snapshots iterate in a stable order.
//!
//! Every transition operation is total: references to players the state
//! has never seen are silent no-ops, never errors. The log stream arrives
//! over UDP and a join line can be lost or reordered relative to the
//! lines that depend on it.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};

use crate::session::snapshot::{StateSnapshot, PlayerSnapshot};

/// Map name reported before the first map-change line is seen.
pub const UNKNOWN_MAP: &str = "unknown";

// =============================================================================
// PLAYER KEY
// =============================================================================

/// Persistent per-player identifier.
///
/// The digit run inside the first angle bracket of a player token, e.g.
/// the `42` in `"Gordon<42><STEAM_0:0:123><>"`. It survives renames and is
/// distinct from both the display name and the transient slot number, but
/// it is only unique within one server instance's lifetime, so it is kept
/// as opaque text rather than interpreted numerically.
///
/// Implements Ord for stable BTreeMap ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(String);

impl PlayerKey {
    /// Create from the raw digit text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PLAYER STAT
// =============================================================================

/// Accumulated statistics for one connected player in the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    /// Persistent key of this player.
    pub key: PlayerKey,

    /// Current display name.
    pub name: String,

    /// Kills this round. Signed: a self-inflicted death costs a kill,
    /// so the counter can go below zero.
    pub kills: i32,

    /// Deaths this round.
    pub deaths: u32,

    /// Dotted-quad address from the join line, when present.
    pub address: Option<String>,
}

impl PlayerStat {
    /// Create a fresh record with zeroed counters.
    pub fn new(key: PlayerKey, name: impl Into<String>, address: Option<String>) -> Self {
        Self {
            key,
            name: name.into(),
            kills: 0,
            deaths: 0,
            address,
        }
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// All mutable tracking state: the current map and the connected players.
///
/// Owned by the dispatcher; observers only ever see [`StateSnapshot`]
/// copies. At most one record exists per key at any time.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    current_map: String,
    players: BTreeMap<PlayerKey, PlayerStat>,
}

impl SessionState {
    /// Create empty state with the unknown map name.
    pub fn new() -> Self {
        Self {
            current_map: UNKNOWN_MAP.to_string(),
            players: BTreeMap::new(),
        }
    }

    /// Name of the map currently being played.
    pub fn current_map(&self) -> &str {
        if self.current_map.is_empty() {
            UNKNOWN_MAP
        } else {
            &self.current_map
        }
    }

    /// Number of currently registered players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up one player's record.
    pub fn player(&self, key: &PlayerKey) -> Option<&PlayerStat> {
        self.players.get(key)
    }

    /// Iterate all records in key order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerStat> {
        self.players.values()
    }

    /// Take an immutable copy of the whole state for observers.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            map: self.current_map().to_string(),
            players: self
                .players
                .values()
                .map(|stat| PlayerSnapshot {
                    key: stat.key.clone(),
                    name: stat.name.clone(),
                    kills: stat.kills,
                    deaths: stat.deaths,
                    address: stat.address.clone(),
                })
                .collect(),
        }
    }

    // =========================================================================
    // Transition operations, one per event kind
    // =========================================================================

    /// Register a player, overwriting any existing record for the key.
    ///
    /// A duplicate join without an intervening leave happens when a
    /// reconnect races the disconnect line; the overwrite resets that
    /// player's counters to zero.
    pub fn on_joined(&mut self, key: PlayerKey, name: impl Into<String>, address: Option<String>) {
        let stat = PlayerStat::new(key.clone(), name, address);
        self.players.insert(key, stat);
    }

    /// Remove a player's record. Unknown key: no-op.
    pub fn on_left(&mut self, key: &PlayerKey) {
        self.players.remove(key);
    }

    /// Credit a kill to `killer` and a death to `victim`.
    ///
    /// Both players must be registered, otherwise the whole event is a
    /// no-op; a kill is never credited against a half-known pair.
    pub fn on_killed(&mut self, killer: &PlayerKey, victim: &PlayerKey) {
        if !self.players.contains_key(killer) || !self.players.contains_key(victim) {
            return;
        }
        if let Some(stat) = self.players.get_mut(killer) {
            stat.kills += 1;
        }
        if let Some(stat) = self.players.get_mut(victim) {
            stat.deaths += 1;
        }
    }

    /// Record a death without a living killer. Unknown key: no-op.
    ///
    /// A self-inflicted death costs the player a kill; a death caused by
    /// the world (falls, drowning) only counts the death.
    pub fn on_self_killed(&mut self, key: &PlayerKey, by_world: bool) {
        if let Some(stat) = self.players.get_mut(key) {
            stat.deaths += 1;
            if !by_world {
                stat.kills -= 1;
            }
        }
    }

    /// Replace a player's display name, keeping counters and address.
    /// Unknown key: no-op.
    pub fn on_renamed(&mut self, key: &PlayerKey, new_name: impl Into<String>) {
        if let Some(stat) = self.players.get_mut(key) {
            stat.name = new_name.into();
        }
    }

    /// Start a new scoring round on the given map.
    ///
    /// Counters reset to zero for everyone; identity and address are kept
    /// because a map change does not disconnect anyone.
    pub fn on_map_changed(&mut self, map: impl Into<String>) {
        self.current_map = map.into();
        for stat in self.players.values_mut() {
            stat.kills = 0;
            stat.deaths = 0;
        }
    }
}
