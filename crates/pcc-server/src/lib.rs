//! Library surface of the PCC server.
//!
//! The binary in `main.rs` wires these pieces together; the integration
//! tests drive them directly over real TCP connections:
//!
//! - [`config`] – CLI arguments with an optional TOML file.
//! - [`server`] – the accept loop: one connection at a time, shutdown
//!   checked at safe points between exchanges.
//! - [`connection`] – the per-connection exchange state machine.
//! - [`stats`] – the process-lifetime histogram, committed to only on
//!   fully completed exchanges.
//! - [`shutdown`] – the interrupt-raised flag the loop polls.

pub mod config;
pub mod connection;
pub mod server;
pub mod shutdown;
pub mod stats;

pub use config::ServerConfig;
pub use connection::Outcome;
pub use server::{Server, ServerError};
pub use shutdown::ShutdownFlag;
pub use stats::GlobalStats;
