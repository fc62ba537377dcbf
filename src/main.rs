//! Fraglog Server
//!
//! Binds the UDP log port, wires the observers to the dispatcher, and
//! runs the receive loop until the process is terminated.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fraglog::{Dispatcher, ListenerConfig, LogListener, DEFAULT_LOG_PORT, VERSION};
use fraglog::observer::{ConsolePrinter, PlayerHistoryStore, RosterFile};

/// File the roster observer maintains next to the daemon.
const ROSTER_FILE: &str = "current_players.txt";

/// File the history observer persists lifetime records to.
const HISTORY_FILE: &str = "player_history.json";

/// Resolve the bind address from the optional first CLI argument.
fn bind_addr() -> anyhow::Result<SocketAddr> {
    match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid bind address '{}'", arg)),
        None => Ok(SocketAddr::from(([0, 0, 0, 0], DEFAULT_LOG_PORT))),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Fraglog Server v{}", VERSION);

    let config = ListenerConfig {
        bind_addr: bind_addr()?,
        ..ListenerConfig::default()
    };

    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Box::new(ConsolePrinter::new()));
    dispatcher.register(Box::new(RosterFile::new(ROSTER_FILE)));
    dispatcher.register(Box::new(
        PlayerHistoryStore::load(HISTORY_FILE)
            .with_context(|| format!("failed to open {}", HISTORY_FILE))?,
    ));

    info!("roster file: {}", ROSTER_FILE);
    info!("history file: {}", HISTORY_FILE);

    let listener = LogListener::bind(config).await?;
    listener.run(&mut dispatcher).await?;

    Ok(())
}
