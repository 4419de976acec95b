//! Per-connection exchange state machine.
//!
//! One exchange runs length read → payload read → count → reply write.
//! Short frames and reset/pipe/timeout conditions abort the connection
//! and leave the statistics untouched; any other transport failure is
//! fatal to the process. The payload buffer is owned by this module and
//! dropped on every exit path.

use std::net::SocketAddr;

use pcc_core::{count_printable, read_exact, read_u32, write_u32, ChannelError, Histogram};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

/// How one client exchange ended.
#[derive(Debug)]
pub enum Outcome {
    /// Full exchange; the delta is ready to commit.
    Completed { count: u32, delta: Histogram },
    /// Peer closed before completing the declared frame.
    AbortedEarlyClose,
    /// Recoverable transport error (reset, broken pipe, timeout).
    AbortedError,
}

/// Drives one exchange end-to-end.
///
/// Recoverable failures are folded into the returned [`Outcome`] after
/// being warn-logged; `Err` carries only the fatal class, which the
/// server loop turns into process termination.
pub async fn serve<S>(stream: &mut S, peer: SocketAddr) -> Result<Outcome, ChannelError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let declared = match read_u32(stream).await {
        Ok(n) => n,
        Err(e) => return abort_or_fatal(e, peer, "length prefix"),
    };

    let mut payload = vec![0u8; declared as usize];
    if let Err(e) = read_exact(stream, &mut payload).await {
        return abort_or_fatal(e, peer, "payload");
    }

    let (count, delta) = count_printable(&payload);
    drop(payload);
    debug!(%peer, declared, count, "payload counted");

    if let Err(e) = write_u32(stream, count).await {
        return abort_or_fatal(e, peer, "count reply");
    }

    Ok(Outcome::Completed { count, delta })
}

/// The single classification point for every read and write site.
fn abort_or_fatal(
    err: ChannelError,
    peer: SocketAddr,
    stage: &str,
) -> Result<Outcome, ChannelError> {
    match &err {
        ChannelError::ShortRead { .. } | ChannelError::ShortWrite { .. } => {
            warn!(%peer, stage, error = %err, "client closed early; dropping connection and continuing");
            Ok(Outcome::AbortedEarlyClose)
        }
        ChannelError::Io(_) if err.is_recoverable() => {
            warn!(%peer, stage, error = %err, "transport error; dropping connection and continuing");
            Ok(Outcome::AbortedError)
        }
        _ => Err(err),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pcc_core::{write_exact, write_u32 as client_write_u32};

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_completed_exchange_returns_count_and_delta() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let task = tokio::spawn(async move { serve(&mut server, peer()).await });

        client_write_u32(&mut client, 14).await.unwrap();
        write_exact(&mut client, b"Hello, World!\n").await.unwrap();
        let reply = read_u32(&mut client).await.unwrap();

        assert_eq!(reply, 13);
        match task.await.unwrap().unwrap() {
            Outcome::Completed { count, delta } => {
                assert_eq!(count, 13);
                assert_eq!(delta.total(), 13);
                assert_eq!(delta.count_of(b'H'), Some(1));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_length_payload_completes_with_zero_count() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let task = tokio::spawn(async move { serve(&mut server, peer()).await });

        client_write_u32(&mut client, 0).await.unwrap();
        assert_eq!(read_u32(&mut client).await.unwrap(), 0);

        match task.await.unwrap().unwrap() {
            Outcome::Completed { count, delta } => {
                assert_eq!(count, 0);
                assert_eq!(delta.total(), 0);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_during_length_prefix_aborts() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let task = tokio::spawn(async move { serve(&mut server, peer()).await });

        write_exact(&mut client, &[0x00, 0x01]).await.unwrap();
        drop(client);

        assert!(matches!(
            task.await.unwrap().unwrap(),
            Outcome::AbortedEarlyClose
        ));
    }

    #[tokio::test]
    async fn test_close_during_payload_aborts() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let task = tokio::spawn(async move { serve(&mut server, peer()).await });

        client_write_u32(&mut client, 10).await.unwrap();
        write_exact(&mut client, b"abc").await.unwrap();
        drop(client);

        assert!(matches!(
            task.await.unwrap().unwrap(),
            Outcome::AbortedEarlyClose
        ));
    }

    #[tokio::test]
    async fn test_clean_close_before_any_byte_aborts() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);

        let outcome = serve(&mut server, peer()).await.unwrap();
        assert!(matches!(outcome, Outcome::AbortedEarlyClose));
    }
}
