//! Pombola pages server.
//!
//! Serves the county-performance call-to-action page and the committee
//! attendance dashboard.

use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pombola_core::Config;

/// Log filter used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "pombola_web=info,pombola_core=info,tower_http=info";

/// Log file name prefix inside the log directory
const LOG_FILE_PREFIX: &str = "pombola.log";

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::load();
    let _guard = init_tracing(config.log_dir.as_deref());
    info!(bind = %config.bind, "Pombola starting");

    pombola_web::run(config).await?;

    info!("Pombola shutting down");
    Ok(())
}
