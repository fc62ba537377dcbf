//! Console Scoreboard
//!
//! Prints the current scoreboard to stdout after every applied event.

use std::io::Write;

use crate::session::dispatch::{Observer, ObserverError};
use crate::session::event::LogEvent;
use crate::session::snapshot::StateSnapshot;

/// Renders the session scoreboard to stdout.
#[derive(Debug, Default)]
pub struct ConsolePrinter;

impl ConsolePrinter {
    /// Create a printer.
    pub fn new() -> Self {
        Self
    }

    fn render(snapshot: &StateSnapshot, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "== {} == {} player(s)", snapshot.map, snapshot.players.len())?;
        for player in &snapshot.players {
            let address = player.address.as_deref().unwrap_or("-");
            writeln!(
                out,
                "  {:<24} kills {:>4}  deaths {:>4}  {}",
                player.name, player.kills, player.deaths, address
            )?;
        }
        Ok(())
    }
}

impl Observer for ConsolePrinter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn on_event(&mut self, _event: &LogEvent, snapshot: &StateSnapshot) -> Result<(), ObserverError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        Self::render(snapshot, &mut out)?;
        Ok(())
    }
}
