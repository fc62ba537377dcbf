//! UDP Log Listener
//!
//! Receives the game server's log stream one datagram at a time and feeds
//! each decoded line to the dispatcher. Strictly sequential: a datagram is
//! processed to completion before the next receive, so the session state
//! needs no locking.

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use crate::session::dispatch::Dispatcher;

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Receive buffer size; datagrams beyond this are truncated by the OS.
    pub recv_buffer: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{}", crate::DEFAULT_LOG_PORT).parse().unwrap(),
            recv_buffer: 1024,
        }
    }
}

/// Listener errors.
#[derive(Debug, thiserror::Error)]
pub enum ListenError {
    /// Failed to bind the UDP socket at startup.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },
}

/// UDP listener bound to the log stream port.
pub struct LogListener {
    socket: UdpSocket,
    config: ListenerConfig,
}

impl LogListener {
    /// Bind the socket. Binding is the only fatal failure in this layer.
    pub async fn bind(config: ListenerConfig) -> Result<Self, ListenError> {
        let socket = UdpSocket::bind(config.bind_addr)
            .await
            .map_err(|source| ListenError::Bind { addr: config.bind_addr, source })?;
        info!("listening for log stream on {}", config.bind_addr);
        Ok(Self { socket, config })
    }

    /// Local address the socket is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive datagrams forever, feeding each line to the dispatcher.
    ///
    /// Receive errors are transient (ICMP unreachable bounces surface
    /// here on some platforms) and are logged and skipped; the loop only
    /// ends when the process is terminated.
    pub async fn run(self, dispatcher: &mut Dispatcher) -> Result<(), ListenError> {
        let mut buf = vec![0u8; self.config.recv_buffer];

        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    warn!("recv failed: {}", e);
                    continue;
                }
            };

            let text = String::from_utf8_lossy(&buf[..len]);
            debug!("{} bytes from {}: {}", len, peer, text.trim_end());

            for line in decode_lines(&text) {
                if !dispatcher.handle(line) {
                    debug!("unrecognized line: {}", line);
                }
            }
        }
    }
}

/// Split a decoded datagram into log lines.
///
/// GoldSrc prefixes each packet with four 0xFF bytes and a `log` marker;
/// the lossy UTF-8 decode turns the prefix into replacement characters,
/// which are stripped here along with surrounding whitespace and NULs.
fn decode_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.trim_matches(|c: char| c == '\u{fffd}' || c == '\0' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
}
