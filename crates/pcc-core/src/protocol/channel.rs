//! Exact-length reads and writes over a byte-stream transport.
//!
//! TCP may deliver or accept fewer bytes than requested per call, so every
//! frame of the protocol is transferred through an accumulation loop that
//! keeps going until the full length has moved. A peer that closes the
//! connection mid-frame (or before sending anything) surfaces as a
//! [`ChannelError::ShortRead`] / [`ChannelError::ShortWrite`] carrying the
//! byte position reached, distinct from transport-level failures.
//!
//! Error classification is centralized in [`ChannelError::is_recoverable`]
//! so that the length-read, payload-read, and reply-write sites all apply
//! exactly the same policy.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::wire::{decode_u32, encode_u32, FRAME_HEADER_SIZE};

/// Errors produced by the framed channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The peer closed the connection before the full frame arrived.
    #[error("peer closed after {read} of {expected} bytes")]
    ShortRead { expected: usize, read: usize },

    /// The peer stopped accepting bytes before the full frame was sent.
    #[error("peer stopped accepting after {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    /// A transport-level I/O failure.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}

impl ChannelError {
    /// Whether this failure should cost one connection rather than the
    /// whole process: short frames, plus connection-reset, broken-pipe,
    /// and timed-out transport conditions.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChannelError::ShortRead { .. } | ChannelError::ShortWrite { .. } => true,
            ChannelError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::TimedOut
            ),
        }
    }
}

/// Fills `buf` completely, issuing repeated reads while the transport
/// still yields data.
///
/// # Errors
///
/// Returns [`ChannelError::ShortRead`] if the peer closes with the buffer
/// only partially filled (including before the first byte), or
/// [`ChannelError::Io`] for transport failures.
pub async fn read_exact<R>(reader: &mut R, buf: &mut [u8]) -> Result<(), ChannelError>
where
    R: AsyncRead + Unpin,
{
    let expected = buf.len();
    let mut read = 0;
    while read < expected {
        let n = reader.read(&mut buf[read..]).await?;
        if n == 0 {
            return Err(ChannelError::ShortRead { expected, read });
        }
        read += n;
    }
    Ok(())
}

/// Writes all of `buf`, issuing repeated writes while the transport still
/// accepts data.
///
/// # Errors
///
/// Returns [`ChannelError::ShortWrite`] if the peer stops accepting bytes
/// mid-frame, or [`ChannelError::Io`] for transport failures.
pub async fn write_exact<W>(writer: &mut W, buf: &[u8]) -> Result<(), ChannelError>
where
    W: AsyncWrite + Unpin,
{
    let expected = buf.len();
    let mut written = 0;
    while written < expected {
        let n = writer.write(&buf[written..]).await?;
        if n == 0 {
            return Err(ChannelError::ShortWrite { expected, written });
        }
        written += n;
    }
    writer.flush().await?;
    Ok(())
}

/// Reads one 4-byte big-endian integer frame.
pub async fn read_u32<R>(reader: &mut R) -> Result<u32, ChannelError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; FRAME_HEADER_SIZE];
    read_exact(reader, &mut buf).await?;
    Ok(decode_u32(buf))
}

/// Writes one 4-byte big-endian integer frame.
pub async fn write_u32<W>(writer: &mut W, value: u32) -> Result<(), ChannelError>
where
    W: AsyncWrite + Unpin,
{
    write_exact(writer, &encode_u32(value)).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
