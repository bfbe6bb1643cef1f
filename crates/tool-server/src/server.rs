//! Newline-delimited JSON-RPC server.
//!
//! Reads one request per line, answers on the writer, and stops at EOF or
//! when the cancellation token fires. Requests are handled one at a time.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use devicemcp_protocol::constants::{
    JSONRPC_VERSION, RPC_INTERNAL_ERROR, RPC_INVALID_PARAMS, RPC_INVALID_REQUEST,
    RPC_METHOD_NOT_FOUND, RPC_PARSE_ERROR,
};
use devicemcp_protocol::messages::{
    CallToolParams, CallToolResult, InitializeResult, ToolsListResult,
};
use devicemcp_protocol::{Method, Request, Response, ToolName};
use devicemcp_telemetry::DeviceProvider;

use crate::ServerError;
use crate::toolbox::Toolbox;

/// Serves a [`Toolbox`] over JSON-RPC.
pub struct ToolServer<P: DeviceProvider> {
    toolbox: Toolbox<P>,
    cancel: CancellationToken,
}

impl<P: DeviceProvider> ToolServer<P> {
    pub fn new(toolbox: Toolbox<P>) -> Self {
        Self {
            toolbox,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops [`serve`](Self::serve) when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stops the request loop after the current request.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Serves stdin/stdout until EOF or shutdown.
    pub async fn serve_stdio(&self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }

    /// Serves requests read from `reader`, writing responses to `writer`.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("tool server ready");
        let mut lines = reader.lines();

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("tool server shutting down");
                    break;
                }

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::info!("input closed, tool server stopping");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(resp) = self.handle_line(&line).await {
                        let mut out = serde_json::to_vec(&resp)?;
                        out.push(b'\n');
                        writer.write_all(&out).await?;
                        writer.flush().await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handles one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let req: Request = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => return Some(reject_line(line, e)),
        };

        if req.jsonrpc != JSONRPC_VERSION {
            tracing::warn!(version = %req.jsonrpc, "unsupported jsonrpc version");
            return (!req.is_notification())
                .then(|| req.reply_error(RPC_INVALID_REQUEST, "unsupported jsonrpc version"));
        }

        if req.is_notification() {
            tracing::debug!(method = ?req.method, "notification");
            return None;
        }

        Some(self.dispatch(&req).await)
    }

    async fn dispatch(&self, req: &Request) -> Response {
        tracing::debug!(method = ?req.method, "request");
        let result = match req.method {
            Method::Initialize => {
                req.reply(&InitializeResult::for_version(env!("CARGO_PKG_VERSION")))
            }
            Method::Ping | Method::Initialized | Method::Cancelled => {
                req.reply(&serde_json::json!({}))
            }
            Method::ToolsList => req.reply(&ToolsListResult::all()),
            Method::ToolsCall => return self.call_tool(req).await,
            Method::Unknown => {
                return req.reply_error(RPC_METHOD_NOT_FOUND, "method not found");
            }
        };
        result.unwrap_or_else(|e| internal_error(req, e))
    }

    async fn call_tool(&self, req: &Request) -> Response {
        let params: CallToolParams = match req.parse_params() {
            Ok(Some(p)) => p,
            Ok(None) => return req.reply_error(RPC_INVALID_PARAMS, "missing params"),
            Err(e) => return req.reply_error(RPC_INVALID_PARAMS, format!("invalid params: {e}")),
        };

        let Some(tool) = ToolName::from_name(&params.name) else {
            tracing::warn!(tool = %params.name, "unknown tool");
            return req.reply_error(RPC_INVALID_PARAMS, format!("unknown tool: {}", params.name));
        };

        let output = match self.toolbox.call(tool).await {
            Ok(v) => v,
            Err(e) => return internal_error(req, e),
        };
        CallToolResult::from_output(output)
            .and_then(|result| req.reply(&result))
            .unwrap_or_else(|e| internal_error(req, e))
    }
}

/// Error response for a line that is not a valid request.
fn reject_line(line: &str, err: serde_json::Error) -> Response {
    match serde_json::from_str::<serde_json::Value>(line) {
        Ok(value) => {
            tracing::warn!("invalid request: {err}");
            let id = value.get("id").cloned().unwrap_or_default();
            Response::error(id, RPC_INVALID_REQUEST, format!("invalid request: {err}"))
        }
        Err(_) => {
            tracing::warn!("parse error: {err}");
            Response::error(
                serde_json::Value::Null,
                RPC_PARSE_ERROR,
                format!("parse error: {err}"),
            )
        }
    }
}

fn internal_error(req: &Request, err: serde_json::Error) -> Response {
    tracing::error!("failed to encode response: {err}");
    req.reply_error(RPC_INTERNAL_ERROR, "internal error")
}
