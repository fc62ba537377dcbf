//! Roster File
//!
//! Maintains a flat file listing the currently connected players, for
//! shell scripts and status pages to read. When the last player leaves
//! the file is removed rather than left behind empty.

use std::fs;
use std::path::PathBuf;

use crate::session::dispatch::{Observer, ObserverError};
use crate::session::event::LogEvent;
use crate::session::snapshot::StateSnapshot;

/// Writes the current-players roster to a flat file after every event.
#[derive(Debug)]
pub struct RosterFile {
    path: PathBuf,
}

impl RosterFile {
    /// Create a roster writer targeting the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Observer for RosterFile {
    fn name(&self) -> &'static str {
        "roster"
    }

    fn on_event(&mut self, _event: &LogEvent, snapshot: &StateSnapshot) -> Result<(), ObserverError> {
        if snapshot.players.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }

        let mut contents = String::from("Current players:\n");
        for player in &snapshot.players {
            contents.push_str(&player.name);
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
