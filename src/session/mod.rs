//! Session Tracking Module
//!
//! Everything needed to turn raw server log lines into per-player session
//! statistics. Pure CPU-bound code - all I/O lives in `network/` and
//! `observer/`.
//!
//! ## Module Structure
//!
//! - `event`: Typed domain events extracted from log lines
//! - `extract`: Line recognizers (compiled once, applied per line)
//! - `state`: Session state and the per-event transition operations
//! - `snapshot`: Read-only state views handed to observers
//! - `dispatch`: Line -> event -> state transition -> observer fan-out

pub mod event;
pub mod extract;
pub mod state;
pub mod snapshot;
pub mod dispatch;

// Re-export key types
pub use event::LogEvent;
pub use extract::LogExtractor;
pub use state::{SessionState, PlayerStat, PlayerKey};
pub use snapshot::{StateSnapshot, PlayerSnapshot};
pub use dispatch::{Dispatcher, Observer, ObserverError};
