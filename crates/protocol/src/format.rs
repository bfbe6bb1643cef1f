//! Human-readable renderings attached next to the raw numeric fields.

use crate::types::UNKNOWN;

/// Units below petabytes. Anything that survives the whole ladder is shown in PB.
const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary (1024) steps and two decimals.
///
/// `format_bytes(1536) == "1.50 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in BYTE_UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Formats a duration in seconds as `"2h 30m"`, `"45m"` or `"30s"`.
///
/// Negative input means the duration is unknown. Seconds are dropped once
/// the duration reaches a full minute.
pub fn format_time(seconds: i64) -> String {
    if seconds < 0 {
        return UNKNOWN.to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

/// Formats a percentage with two decimals (`"45.67%"`).
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}
