//! Tool surface for DeviceMCP.
//!
//! [`Toolbox`] wraps the selected telemetry provider and exposes the five
//! tool operations; [`ToolServer`] serves them as newline-delimited
//! JSON-RPC over stdin/stdout until EOF or shutdown.

mod server;
mod toolbox;

pub use server::ToolServer;
pub use toolbox::Toolbox;

/// Errors produced by the tool server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
