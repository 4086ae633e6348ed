//! Session relay service.
//!
//! # Architecture Overview
//!
//! ```text
//!   client ──▶ relay A ──(call=B, minus A's cookie)──▶ relay B ──▶ ...
//!          ◀── A's cookie + B's cookies ◀── B's cookie ──┘
//! ```
//!
//! Configuration comes from an optional TOML file (`--config`) overlaid with
//! `SERVICE_NAME`, `SERVICE_PORT` and `SECURE_COOKIE_ATTRIBUTE`.

use clap::Parser;
use std::path::PathBuf;

use session_relay::config::load_from_env;
use session_relay::lifecycle::{signals, startup, Shutdown};
use session_relay::observability::{logging, metrics};
use session_relay::HttpServer;

#[derive(Parser)]
#[command(name = "session-relay")]
#[command(about = "Session-propagating HTTP relay", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_from_env(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        service_name = %config.service.name,
        port = config.service.port,
        secure_cookie = config.session.secure_cookie,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Already validated as a socket address.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let host = startup::local_hostname();
    let server = HttpServer::new(config.clone(), &host)?;
    let listener = startup::bind(&config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tracing::info!(
        "Service {} started on {}:{}.",
        config.service.name,
        host,
        config.service.port
    );

    let mut server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
