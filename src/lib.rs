//! # Fraglog Server
//!
//! Log telemetry daemon for GoldSrc-style game servers. Listens to the
//! server's UDP log stream, recognizes player events in the raw lines,
//! and maintains per-player kill/death statistics for the current map.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FRAGLOG SERVER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  session/        - Core tracking logic (pure, CPU-bound)     │
//! │  ├── event.rs    - Typed domain events                       │
//! │  ├── extract.rs  - Precompiled line recognizers              │
//! │  ├── state.rs    - Per-player stats and transitions          │
//! │  ├── snapshot.rs - Read-only views for observers             │
//! │  └── dispatch.rs - Line -> event -> state -> observers       │
//! │                                                              │
//! │  network/        - Transport (I/O edge)                      │
//! │  └── listener.rs - UDP receive loop, one datagram at a time  │
//! │                                                              │
//! │  observer/       - Snapshot consumers (I/O edge)             │
//! │  ├── console.rs  - Scoreboard on stdout                      │
//! │  ├── roster.rs   - Current-players flat file                 │
//! │  └── history.rs  - Durable per-player aggregation            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Robustness Guarantee
//!
//! The `session/` core never fails on adversarial or incomplete input:
//! - Unrecognized and malformed lines are dropped, not errors
//! - Events naming unknown players are silent no-ops (UDP can drop or
//!   reorder the join line relative to everything that follows)
//! - Observer failures are logged at the dispatch boundary and never
//!   reach the ingestion loop
//!
//! The receive loop is strictly sequential, so the state store needs no
//! locking: one datagram is fully processed before the next is read.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod session;
pub mod network;
pub mod observer;

// Re-export commonly used types
pub use session::event::LogEvent;
pub use session::extract::LogExtractor;
pub use session::state::{SessionState, PlayerStat, PlayerKey};
pub use session::snapshot::{StateSnapshot, PlayerSnapshot};
pub use session::dispatch::{Dispatcher, Observer, ObserverError};
pub use network::listener::{LogListener, ListenerConfig, ListenError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default UDP port game servers are pointed at with `logaddress`
pub const DEFAULT_LOG_PORT: u16 = 11001;
