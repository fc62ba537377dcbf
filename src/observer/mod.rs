//! Boundary Observers
//!
//! Consumers of state snapshots: rendering and persistence. None of these
//! can affect the session state; their failures are reported by the
//! dispatcher and ingestion continues.
//!
//! ## Module Structure
//!
//! - `console`: Scoreboard printed to stdout after every event
//! - `roster`: Flat file listing currently connected players
//! - `history`: Durable per-player aggregation across sessions

pub mod console;
pub mod roster;
pub mod history;

pub use console::ConsolePrinter;
pub use roster::RosterFile;
pub use history::{PlayerHistoryStore, PlayerHistory};
