//! Android provider for Termux-hosted processes.
//!
//! Battery and release information come from Termux/Android tools first
//! (`termux-battery-status`, `getprop`); every command is bounded by the
//! command timeout and falls back to the generic Linux primitives.

use std::future::Future;
use std::path::Path;

use devicemcp_protocol::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo};

use crate::battery::{SensorBattery, parse_termux_status, sensor_info};
use crate::command::run_command;
use crate::disks::{MountEntry, collect_storage, mounts};
use crate::provider::{DeviceProvider, ProviderOptions};
use crate::{host, sensors};

const EXCLUDED_FS: [&str; 4] = ["tmpfs", "devtmpfs", "sysfs", "proc"];

/// Reported when the CPU brand string is unavailable (common on ARM SoCs).
const DEFAULT_PROCESSOR: &str = "ARM";

fn is_excluded(entry: &MountEntry) -> bool {
    EXCLUDED_FS.contains(&entry.fs_type.as_str())
}

/// Prefers parsed `termux-battery-status` output; awaits `sensor` only when
/// the command was missing or printed something unparsable.
async fn termux_or_sensor<F>(termux_output: Option<String>, sensor: F) -> BatteryInfo
where
    F: Future<Output = Option<SensorBattery>>,
{
    if let Some(info) = termux_output.as_deref().and_then(parse_termux_status) {
        return info;
    }
    tracing::debug!("termux battery status unavailable, using sensor");
    sensor_info(sensor.await)
}

#[derive(Debug, Clone, Default)]
pub struct AndroidProvider {
    options: ProviderOptions,
}

impl AndroidProvider {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl DeviceProvider for AndroidProvider {
    fn tag(&self) -> PlatformTag {
        PlatformTag::Android
    }

    async fn device_info(&self) -> DeviceInfo {
        let version = run_command(
            "getprop",
            &["ro.build.version.release"],
            self.options.command_timeout,
        )
        .await
        .unwrap_or_default();

        let mut processor = host::processor();
        if processor.trim().is_empty() {
            processor = DEFAULT_PROCESSOR.to_string();
        }

        DeviceInfo::new(
            PlatformTag::Android,
            "Android",
            version,
            host::hostname(),
            host::architecture(),
            processor,
        )
    }

    async fn battery_info(&self) -> BatteryInfo {
        let timeout = self.options.command_timeout;
        let output = run_command("termux-battery-status", &[], timeout).await;
        termux_or_sensor(output, sensors::read_battery(timeout)).await
    }

    async fn storage_info(&self, _path: Option<&Path>) -> Vec<StorageInfo> {
        collect_storage(mounts(), is_excluded)
    }

    async fn memory_info(&self) -> MemoryInfo {
        let m = host::memory();
        MemoryInfo::from_counters(m.total, m.available, m.used, m.swap_if_configured())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::*;
    use crate::battery::SecsLeft;

    fn provider() -> AndroidProvider {
        AndroidProvider::new(ProviderOptions {
            command_timeout: Duration::from_millis(500),
        })
    }

    #[test]
    fn excludes_pseudo_filesystems() {
        let entry = |fs: &str| MountEntry {
            mount_point: "/data".into(),
            fs_type: fs.into(),
            total: 1,
            free: 1,
            available: 1,
        };
        assert!(is_excluded(&entry("proc")));
        assert!(is_excluded(&entry("sysfs")));
        assert!(is_excluded(&entry("tmpfs")));
        assert!(!is_excluded(&entry("f2fs")));
        assert!(!is_excluded(&entry("overlay")));
    }

    #[tokio::test]
    async fn device_info_degrades_without_getprop() {
        let info = provider().device_info().await;
        assert_eq!(info.os_name, "Android");
        assert_eq!(info.platform, PlatformTag::Android);
        assert!(!info.os_version.is_empty());
        assert!(!info.processor.is_empty());
    }

    fn reading() -> Option<SensorBattery> {
        Some(SensorBattery {
            percent: 42.0,
            power_plugged: Some(false),
            secs_left: SecsLeft::Seconds(600),
        })
    }

    #[tokio::test]
    async fn termux_output_wins_over_sensor() {
        let output = r#"{"health":"GOOD","percentage":77,"plugged":"PLUGGED_USB","status":"CHARGING","temperature":31.2}"#;
        let sensor_read = Cell::new(false);
        let b = termux_or_sensor(Some(output.into()), async {
            sensor_read.set(true);
            reading()
        })
        .await;
        assert!(!sensor_read.get());
        assert_eq!(b.percentage, Some(77.0));
        assert_eq!(b.is_charging, Some(true));
        assert_eq!(b.is_plugged, Some(true));
        assert_eq!(b.time_remaining, None);
    }

    #[tokio::test]
    async fn malformed_termux_output_uses_sensor() {
        let b = termux_or_sensor(Some("termux-api not installed".into()), async { reading() }).await;
        assert!(b.has_battery);
        assert_eq!(b.percentage, Some(42.0));
        assert_eq!(b.is_plugged, Some(false));
        assert_eq!(b.time_remaining, Some(600));
    }

    #[tokio::test]
    async fn missing_termux_uses_sensor() {
        let b = termux_or_sensor(None, async { reading() }).await;
        assert_eq!(b.percentage, Some(42.0));
    }

    #[tokio::test]
    async fn no_termux_and_no_sensor_is_absent() {
        let b = termux_or_sensor(None, async { None }).await;
        assert_eq!(b, BatteryInfo::absent());
    }

    #[tokio::test]
    async fn battery_info_is_consistent() {
        let b = provider().battery_info().await;
        if !b.has_battery {
            assert!(b.percentage.is_none());
        }
    }
}
