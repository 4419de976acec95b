//! PCC client entry point.
//!
//! Reads the whole input file, sends it to the server as one framed
//! payload, and prints the printable-byte count the server replies with.
//! Every failure is fatal: argument, file, and socket errors all exit
//! non-zero with a message on stderr.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the client.
#[derive(Parser, Debug)]
#[command(name = "pcc-client")]
#[command(about = "Send a file to a PCC server and print the printable-byte count")]
struct CliArgs {
    /// Server IPv4 address (dotted decimal)
    server_ip: Ipv4Addr,

    /// Server port
    port: u16,

    /// File whose bytes are sent as the payload
    file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let payload = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read input file '{}'", args.file.display()))?;

    let addr = SocketAddr::V4(SocketAddrV4::new(args.server_ip, args.port));
    let count = pcc_client::request_count(addr, &payload)
        .await
        .with_context(|| format!("exchange with {addr} failed"))?;

    println!("# of printable characters: {count}");
    Ok(())
}
