//! Protocol module containing the wire encoding and the framed channel.

pub mod channel;
pub mod wire;

pub use channel::{read_exact, read_u32, write_exact, write_u32, ChannelError};
pub use wire::{decode_u32, encode_u32, FRAME_HEADER_SIZE};
