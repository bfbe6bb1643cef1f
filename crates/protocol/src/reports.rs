//! Tool responses: the normalized records plus their formatted companions.
//!
//! The companions are display strings only; the numeric fields are carried
//! through unchanged.

use serde::{Deserialize, Serialize};

use crate::format::format_bytes;
use crate::format::format_time;
use crate::types::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo, UNKNOWN};

/// Battery state with a readable time estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryReport {
    #[serde(flatten)]
    pub battery: BatteryInfo,
    pub time_remaining_formatted: String,
}

impl From<BatteryInfo> for BatteryReport {
    fn from(battery: BatteryInfo) -> Self {
        let time_remaining_formatted = match battery.time_remaining {
            Some(secs) => format_time(i64::try_from(secs).unwrap_or(i64::MAX)),
            None => UNKNOWN.to_string(),
        };
        Self {
            battery,
            time_remaining_formatted,
        }
    }
}

/// One mount with readable sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageReport {
    #[serde(flatten)]
    pub storage: StorageInfo,
    pub total_formatted: String,
    pub used_formatted: String,
    pub free_formatted: String,
}

impl From<StorageInfo> for StorageReport {
    fn from(storage: StorageInfo) -> Self {
        Self {
            total_formatted: format_bytes(storage.total_bytes),
            used_formatted: format_bytes(storage.used_bytes),
            free_formatted: format_bytes(storage.free_bytes),
            storage,
        }
    }
}

/// Memory counters with readable sizes. Swap strings appear only when the
/// platform reported swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryReport {
    #[serde(flatten)]
    pub memory: MemoryInfo,
    pub total_formatted: String,
    pub available_formatted: String,
    pub used_formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_total_formatted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_used_formatted: Option<String>,
}

impl From<MemoryInfo> for MemoryReport {
    fn from(memory: MemoryInfo) -> Self {
        let (swap_total_formatted, swap_used_formatted) = match memory.swap_total_bytes {
            Some(total) => (
                Some(format_bytes(total)),
                Some(format_bytes(memory.swap_used_bytes.unwrap_or(0))),
            ),
            None => (None, None),
        };
        Self {
            total_formatted: format_bytes(memory.total_bytes),
            available_formatted: format_bytes(memory.available_bytes),
            used_formatted: format_bytes(memory.used_bytes),
            swap_total_formatted,
            swap_used_formatted,
            memory,
        }
    }
}

/// Everything in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub platform: PlatformTag,
    pub device: DeviceInfo,
    pub battery: BatteryReport,
    pub storage: Vec<StorageReport>,
    pub memory: MemoryReport,
}
