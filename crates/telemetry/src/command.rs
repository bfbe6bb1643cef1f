//! Bounded external command execution.

use std::process::Stdio;
use std::time::Duration;

/// Runs `program` with `args` and returns its trimmed stdout.
///
/// Returns `None` when the binary is missing, exits non-zero, or does not
/// finish within `timeout`. The child is killed when the timeout fires.
pub(crate) async fn run_command(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, output).await {
        Ok(Ok(o)) if o.status.success() => {
            Some(String::from_utf8_lossy(&o.stdout).trim().to_string())
        }
        Ok(Ok(o)) => {
            tracing::debug!(program, status = %o.status, "command exited with failure");
            None
        }
        Ok(Err(e)) => {
            tracing::debug!(program, "command unavailable: {e}");
            None
        }
        Err(_) => {
            tracing::warn!(program, timeout_ms = timeout.as_millis() as u64, "command timed out");
            None
        }
    }
}
