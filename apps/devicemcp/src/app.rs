//! Wires the provider, tool surface and transport together.

use devicemcp_telemetry::{DeviceProvider, ProviderOptions, get_provider_with};
use devicemcp_tool_server::{ToolServer, Toolbox};

use crate::config::Config;

/// Runs the server until stdin closes or Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let options = ProviderOptions {
        command_timeout: config.command_timeout(),
    };
    // Built once; every tool call reuses it.
    let provider = get_provider_with(config.platform.as_deref(), options)?;
    tracing::info!(platform = %provider.tag(), "provider ready");

    let server = ToolServer::new(Toolbox::new(provider));

    let cancel = server.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            cancel.cancel();
        }
    });

    server.serve_stdio().await?;
    Ok(())
}
