//! # pcc-core
//!
//! Shared library for the PCC (printable character counting) protocol,
//! used by both the server and the client.
//!
//! The protocol is deliberately small: a client opens a TCP connection,
//! sends a 4-byte big-endian length followed by that many raw bytes, and
//! receives a 4-byte big-endian count of the printable bytes (values
//! 0x20 through 0x7E) back. One exchange per connection.
//!
//! This crate defines:
//!
//! - **`protocol`** – how bytes travel over the wire: the 4-byte integer
//!   encoding and the framed channel, which turns a transport that may
//!   deliver fewer bytes than requested into exact-length reads and
//!   writes with a single error classification for every call site.
//!
//! - **`domain`** – pure counting logic with no I/O: the single-pass
//!   printable counter and the 95-bucket occurrence histogram.
//!
//! It has no dependency on sockets; the channel is generic over any
//! `AsyncRead`/`AsyncWrite` transport, which is also how the tests drive
//! it through in-memory pipes.

pub mod domain;
pub mod protocol;

// Re-export the most-used items at the crate root so callers can write
// `pcc_core::count_printable` instead of the full module path.
pub use domain::counter::count_printable;
pub use domain::histogram::{
    is_printable, Histogram, PRINTABLE_MAX, PRINTABLE_MIN, PRINTABLE_SPAN,
};
pub use protocol::channel::{read_exact, read_u32, write_exact, write_u32, ChannelError};
pub use protocol::wire::{decode_u32, encode_u32, FRAME_HEADER_SIZE};
