//! Log Line Recognizers
//!
//! Turns one raw log line into at most one [`LogEvent`]. All patterns are
//! compiled once at construction and applied per line with no allocation
//! beyond the captured fields.
//!
//! The log dialect is the GoldSrc one: every statement about a player
//! embeds a token of the form `"NAME<KEY><AUTHID><TEAM>"`, where NAME is
//! free text without quotes and KEY is the digit run this crate uses as
//! the persistent player key.

use regex::Regex;

use crate::session::event::LogEvent;
use crate::session::state::PlayerKey;

/// Cause text the engine logs when the environment kills a player.
const WORLD_CAUSE: &str = "world";

/// Regex fragment matching one quoted player token.
///
/// Captures the display name and the persistent key under the given group
/// names; the trailing auth/team brackets are matched but not captured.
fn player_token(name_group: &str, key_group: &str) -> String {
    format!(r#""(?P<{name_group}>[^"<]+)<(?P<{key_group}>[0-9]+)>[^"]*""#)
}

/// Stateless line-to-event extractor with precompiled patterns.
///
/// Recognition precedence is fixed: join > leave > kill > self-kill >
/// rename > map change. The first matching recognizer wins, so a line
/// whose free-text fields happen to contain another trigger word is still
/// classified deterministically.
#[derive(Debug)]
pub struct LogExtractor {
    join: Regex,
    leave: Regex,
    kill: Regex,
    suicide: Regex,
    rename: Regex,
    map_change: Regex,
}

impl LogExtractor {
    /// Compile all recognizers.
    pub fn new() -> Self {
        let player = player_token("name", "key");
        let killer = player_token("killer_name", "killer_key");
        let victim = player_token("victim_name", "victim_key");

        let join = format!(
            r#"{player}\s+connected\b(?:,\s+address\s+"(?P<addr>[0-9]{{1,3}}(?:\.[0-9]{{1,3}}){{3}})(?::[0-9]+)?")?"#
        );
        let leave = format!(r#"{player}\s+disconnected\b"#);
        let kill = format!(r#"{killer}\s+killed\s+{victim}(?:\s+with\s+"[^"]*")?"#);
        let suicide = format!(r#"{player}\s+committed suicide(?:\s+with\s+"(?P<cause>[^"]*)")?"#);
        let rename = format!(r#"{player}\s+changed name to\s+"(?P<new_name>[^"]*)""#);
        let map_change = r#"Started map\s+"(?P<map>[^"]+)""#.to_string();

        let compile = |pattern: &str| Regex::new(pattern).expect("recognizer pattern must compile");

        Self {
            join: compile(&join),
            leave: compile(&leave),
            kill: compile(&kill),
            suicide: compile(&suicide),
            rename: compile(&rename),
            map_change: compile(&map_change),
        }
    }

    /// Recognize one line.
    ///
    /// Returns `None` for lines that match no pattern and for lines where
    /// a trigger word is present but a required field is missing; neither
    /// case is an error.
    pub fn parse(&self, line: &str) -> Option<LogEvent> {
        if let Some(caps) = self.join.captures(line) {
            return Some(LogEvent::Joined {
                key: PlayerKey::new(&caps["key"]),
                name: caps["name"].to_string(),
                address: caps.name("addr").map(|m| m.as_str().to_string()),
            });
        }

        if let Some(caps) = self.leave.captures(line) {
            return Some(LogEvent::Left {
                key: PlayerKey::new(&caps["key"]),
            });
        }

        if let Some(caps) = self.kill.captures(line) {
            return Some(LogEvent::Killed {
                killer: PlayerKey::new(&caps["killer_key"]),
                victim: PlayerKey::new(&caps["victim_key"]),
            });
        }

        if let Some(caps) = self.suicide.captures(line) {
            return Some(LogEvent::SelfKilled {
                key: PlayerKey::new(&caps["key"]),
                by_world: caps.name("cause").map(|m| m.as_str()) == Some(WORLD_CAUSE),
            });
        }

        if let Some(caps) = self.rename.captures(line) {
            return Some(LogEvent::Renamed {
                key: PlayerKey::new(&caps["key"]),
                new_name: caps["new_name"].to_string(),
            });
        }

        if let Some(caps) = self.map_change.captures(line) {
            return Some(LogEvent::MapChanged {
                map: caps["map"].to_string(),
            });
        }

        None
    }
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self::new()
    }
}
