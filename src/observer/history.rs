//! Player History Store
//!
//! Durable aggregation over join/leave events: first-seen time, login
//! count, cumulative play time, and a running maximum-kills watermark.
//! Boundary code - the session state knows nothing about it, and nothing
//! here is recovered into core state at restart.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::session::dispatch::{Observer, ObserverError};
use crate::session::event::LogEvent;
use crate::session::snapshot::StateSnapshot;
use crate::session::state::PlayerKey;

/// Lifetime record for one player, keyed by their persistent key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    /// Persistent key of this player.
    pub key: PlayerKey,
    /// When this key was first seen joining.
    pub first_seen: DateTime<Utc>,
    /// Number of joins recorded.
    pub logins: u32,
    /// Cumulative connected time, in seconds.
    pub seconds_played: i64,
    /// Highest session kill count observed at departure.
    pub max_kills: i32,
}

/// Live bookkeeping for a player currently connected.
///
/// Kill counts are copied out of each snapshot as events flow, because by
/// the time the leave event arrives the player is already gone from the
/// post-leave snapshot.
#[derive(Debug)]
struct ActiveSession {
    joined_at: DateTime<Utc>,
    last_kills: i32,
}

/// JSON-file-backed history aggregation.
#[derive(Debug)]
pub struct PlayerHistoryStore {
    path: PathBuf,
    records: BTreeMap<PlayerKey, PlayerHistory>,
    active: BTreeMap<PlayerKey, ActiveSession>,
}

impl PlayerHistoryStore {
    /// Open the store, loading existing records if the file is present.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ObserverError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, records, active: BTreeMap::new() })
    }

    /// Look up one player's lifetime record.
    pub fn record(&self, key: &PlayerKey) -> Option<&PlayerHistory> {
        self.records.get(key)
    }

    /// Number of players ever recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any player has ever been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<(), ObserverError> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Observer for PlayerHistoryStore {
    fn name(&self) -> &'static str {
        "history"
    }

    fn on_event(&mut self, event: &LogEvent, snapshot: &StateSnapshot) -> Result<(), ObserverError> {
        let now = Utc::now();

        match event {
            LogEvent::Joined { key, .. } => {
                let record = self.records.entry(key.clone()).or_insert_with(|| PlayerHistory {
                    key: key.clone(),
                    first_seen: now,
                    logins: 0,
                    seconds_played: 0,
                    max_kills: 0,
                });
                record.logins += 1;
                self.active.insert(key.clone(), ActiveSession { joined_at: now, last_kills: 0 });
                self.persist()?;
            }

            LogEvent::Left { key } => {
                // A leave for a join that was never seen carries nothing
                // to aggregate.
                if let Some(session) = self.active.remove(key) {
                    if let Some(record) = self.records.get_mut(key) {
                        record.seconds_played += (now - session.joined_at).num_seconds();
                        record.max_kills = record.max_kills.max(session.last_kills);
                    }
                    self.persist()?;
                }
            }

            _ => {
                for player in &snapshot.players {
                    if let Some(session) = self.active.get_mut(&player.key) {
                        session.last_kills = player.kills;
                    }
                }
            }
        }

        Ok(())
    }
}
