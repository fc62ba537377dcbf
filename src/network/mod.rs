//! Network Layer
//!
//! UDP transport for the game server's log stream. This layer only decodes
//! datagrams into text lines - all recognition and state tracking runs
//! through `session/`.

pub mod listener;

pub use listener::{LogListener, ListenerConfig, ListenError};
