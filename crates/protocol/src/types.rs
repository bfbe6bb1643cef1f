use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder for any string the OS cannot supply.
pub const UNKNOWN: &str = "Unknown";

/// Platform family a provider answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
    Android,
}

impl PlatformTag {
    /// Every supported tag, in factory order.
    pub const ALL: [PlatformTag; 4] = [
        PlatformTag::Windows,
        PlatformTag::MacOs,
        PlatformTag::Linux,
        PlatformTag::Android,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Windows => "windows",
            PlatformTag::MacOs => "macos",
            PlatformTag::Linux => "linux",
            PlatformTag::Android => "android",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the four platform tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform tag: {0}")]
pub struct UnknownPlatformTag(pub String);

impl FromStr for PlatformTag {
    type Err = UnknownPlatformTag;

    /// Parses a tag case-insensitively (`"macOS"` and `"MACOS"` both work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(PlatformTag::Windows),
            "macos" => Ok(PlatformTag::MacOs),
            "linux" => Ok(PlatformTag::Linux),
            "android" => Ok(PlatformTag::Android),
            _ => Err(UnknownPlatformTag(s.to_string())),
        }
    }
}

/// OS identity of the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub os_name: String,
    pub os_version: String,
    pub hostname: String,
    pub architecture: String,
    pub processor: String,
    pub platform: PlatformTag,
}

impl DeviceInfo {
    /// Builds a record, replacing blank fields with [`UNKNOWN`].
    pub fn new(
        platform: PlatformTag,
        os_name: impl Into<String>,
        os_version: impl Into<String>,
        hostname: impl Into<String>,
        architecture: impl Into<String>,
        processor: impl Into<String>,
    ) -> Self {
        Self {
            os_name: or_unknown(os_name.into()),
            os_version: or_unknown(os_version.into()),
            hostname: or_unknown(hostname.into()),
            architecture: or_unknown(architecture.into()),
            processor: or_unknown(processor.into()),
            platform,
        }
    }
}

fn or_unknown(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Battery state. Every optional field is `None` when `has_battery` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    pub percentage: Option<f64>,
    pub is_charging: Option<bool>,
    pub is_plugged: Option<bool>,
    /// Estimated seconds until empty.
    pub time_remaining: Option<u64>,
    pub has_battery: bool,
}

impl BatteryInfo {
    /// A host without a battery sensor.
    pub fn absent() -> Self {
        Self {
            percentage: None,
            is_charging: None,
            is_plugged: None,
            time_remaining: None,
            has_battery: false,
        }
    }

    /// A host with a battery. `percentage` is clamped into `[0, 100]`.
    pub fn present(
        percentage: f64,
        is_charging: bool,
        is_plugged: bool,
        time_remaining: Option<u64>,
    ) -> Self {
        let percentage = if percentage.is_nan() {
            0.0
        } else {
            percentage.clamp(0.0, 100.0)
        };
        Self {
            percentage: Some(percentage),
            is_charging: Some(is_charging),
            is_plugged: Some(is_plugged),
            time_remaining,
            has_battery: true,
        }
    }
}

/// Utilization of one mounted filesystem.
///
/// `used_bytes + free_bytes` may fall short of `total_bytes` on filesystems
/// that reserve blocks for the superuser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub usage_percent: f64,
    pub mount_point: String,
}

impl StorageInfo {
    /// Derives used bytes and the usage percentage from capacity counters.
    ///
    /// `total_free_bytes` counts every free block, reserved ones included;
    /// `available_bytes` counts only blocks an unprivileged user may write.
    /// Used space is `total - total_free` and free space is `available`, so
    /// reserved blocks count as neither.
    pub fn from_usage(
        mount_point: impl Into<String>,
        total_bytes: u64,
        total_free_bytes: u64,
        available_bytes: u64,
    ) -> Self {
        let used_bytes = total_bytes.saturating_sub(total_free_bytes);
        let free_bytes = available_bytes.min(total_bytes - used_bytes);
        Self {
            total_bytes,
            used_bytes,
            free_bytes,
            usage_percent: percent_of(used_bytes, used_bytes.saturating_add(free_bytes)),
            mount_point: or_unknown(mount_point.into()),
        }
    }
}

/// Physical memory and swap counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub usage_percent: f64,
    pub swap_total_bytes: Option<u64>,
    pub swap_used_bytes: Option<u64>,
}

impl MemoryInfo {
    /// Builds a record from raw counters. Swap is passed through as given;
    /// callers decide whether a zero swap total is reported or hidden.
    pub fn from_counters(
        total_bytes: u64,
        available_bytes: u64,
        used_bytes: u64,
        swap: Option<(u64, u64)>,
    ) -> Self {
        let available_bytes = available_bytes.min(total_bytes);
        Self {
            total_bytes,
            available_bytes,
            used_bytes: used_bytes.min(total_bytes),
            usage_percent: percent_of(total_bytes - available_bytes, total_bytes),
            swap_total_bytes: swap.map(|(total, _)| total),
            swap_used_bytes: swap.map(|(total, used)| used.min(total)),
        }
    }
}

/// `part / whole * 100`, rounded to one decimal. Zero when `whole` is zero.
fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    ((pct * 10.0).round() / 10.0).clamp(0.0, 100.0)
}
