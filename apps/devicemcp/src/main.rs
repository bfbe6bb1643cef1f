//! DeviceMCP entry point.

mod app;
mod config;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Configuration first: it supplies the default log filter.
    let config = config::Config::load()?;

    // Structured logging on stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting {}",
        devicemcp_protocol::constants::SERVER_NAME
    );
    tracing::info!(
        path = %config::config_path().display(),
        platform = config.platform.as_deref().unwrap_or("auto"),
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config))?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
