//! Client side of the PCC protocol: one exchange per connection.
//!
//! The sender mirrors the server's framing exactly — a 4-byte big-endian
//! length, the raw payload, then a 4-byte big-endian count read back.
//! [`send_payload`] is generic over the transport so the exchange logic is
//! testable without sockets; [`request_count`] binds it to a TCP
//! connection for the binary and for integration tests.

use std::net::SocketAddr;

use pcc_core::{read_u32, write_exact, write_u32, ChannelError};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

/// Errors that can occur in the client.
///
/// All of them are fatal to the client process: it is a single-shot tool
/// with nothing to continue after a failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// TCP connection to the server failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The payload does not fit the protocol's 32-bit length prefix.
    #[error("payload of {len} bytes exceeds the 32-bit length prefix")]
    PayloadTooLarge { len: usize },

    /// The exchange itself failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Performs the sender side of one exchange over an established stream:
/// writes the length prefix and payload, then reads the count reply.
///
/// # Errors
///
/// Returns [`ClientError::PayloadTooLarge`] if the payload length exceeds
/// `u32::MAX`, or a [`ClientError::Channel`] for any framing or transport
/// failure.
pub async fn send_payload<S>(stream: &mut S, payload: &[u8]) -> Result<u32, ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let declared =
        u32::try_from(payload.len()).map_err(|_| ClientError::PayloadTooLarge {
            len: payload.len(),
        })?;

    write_u32(stream, declared).await?;
    write_exact(stream, payload).await?;
    let count = read_u32(stream).await?;
    Ok(count)
}

/// Connects to `addr`, performs one exchange, and returns the server's
/// printable count.
pub async fn request_count(addr: SocketAddr, payload: &[u8]) -> Result<u32, ClientError> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ClientError::Connect { addr, source })?;
    debug!(%addr, payload_len = payload.len(), "connected, sending payload");
    send_payload(&mut stream, payload).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
