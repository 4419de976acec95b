//! PCC server entry point.
//!
//! Binds the listener, registers the SIGINT watcher, and runs the accept
//! loop to completion. On graceful shutdown the lifetime report goes to
//! stdout and the process exits 0; every fatal condition surfaces as an
//! error on stderr with a non-zero exit.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pcc_server::{Server, ServerConfig, ShutdownFlag};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    let shutdown = ShutdownFlag::new();
    shutdown
        .watch_interrupt()
        .context("failed to register SIGINT handler")?;

    let server = Server::bind(config.listen_addr())
        .with_context(|| format!("failed to listen on {}", config.listen_addr()))?;
    info!(addr = %server.local_addr()?, "pcc server listening");

    let stats = server.run(shutdown).await?;

    let stdout = std::io::stdout();
    stats
        .write_report(&mut stdout.lock())
        .context("failed to write shutdown report")?;
    Ok(())
}
