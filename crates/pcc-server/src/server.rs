//! The accept loop.
//!
//! Connections are handled strictly one at a time: the loop drives each
//! exchange to completion before accepting the next, so the statistics
//! are only ever touched between connections and need no locking. The
//! shutdown flag is checked at the top of every iteration; while the
//! loop is parked in accept, a raised flag wakes it immediately.
//!
//! No read or write timeouts are enforced — a stalled peer blocks the
//! server indefinitely. Known limitation, kept.

use std::net::SocketAddr;

use pcc_core::ChannelError;
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, info};

use crate::connection::{self, Outcome};
use crate::shutdown::ShutdownFlag;
use crate::stats::GlobalStats;

/// Pending-connection queue depth for the listening socket.
const LISTEN_BACKLOG: u32 = 10;

/// Fatal server failures. Everything here terminates the process with a
/// non-zero status; recoverable per-connection conditions never reach
/// this type.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("unrecoverable connection error: {0}")]
    Connection(#[from] ChannelError),
}

/// The listening socket plus the statistics it accumulates.
pub struct Server {
    listener: TcpListener,
    stats: GlobalStats,
}

impl Server {
    /// Binds and listens on `addr` with `SO_REUSEADDR` set, so a restart
    /// can reclaim the port immediately.
    pub fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let bind_err = |source| ServerError::Bind { addr, source };

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let listener = socket.listen(LISTEN_BACKLOG).map_err(bind_err)?;

        Ok(Self {
            listener,
            stats: GlobalStats::new(),
        })
    }

    /// The bound address; useful when listening on port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and serves connections until the shutdown flag is raised,
    /// then returns the accumulated statistics for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] on an accept failure or an unrecoverable
    /// connection error; the caller exits non-zero.
    pub async fn run(mut self, shutdown: ShutdownFlag) -> Result<GlobalStats, ServerError> {
        loop {
            if shutdown.is_triggered() {
                info!(
                    connections = self.stats.connections_completed(),
                    "shutdown flag observed; stopping"
                );
                return Ok(self.stats);
            }

            let (mut stream, peer) = tokio::select! {
                accepted = self.listener.accept() => accepted.map_err(ServerError::Accept)?,
                _ = shutdown.triggered() => continue,
            };

            debug!(%peer, "connection accepted");
            match connection::serve(&mut stream, peer).await? {
                Outcome::Completed { count, delta } => {
                    self.stats.commit(&delta);
                    debug!(%peer, count, "connection completed");
                }
                // Already warn-logged at the failing stage; keep accepting.
                Outcome::AbortedEarlyClose | Outcome::AbortedError => {}
            }
        }
    }
}
