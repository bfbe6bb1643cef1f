//! Windows provider.

use std::path::Path;

use devicemcp_protocol::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo};

use crate::battery::sensor_info;
use crate::disks::{MountEntry, collect_storage, mounts};
use crate::provider::{DeviceProvider, ProviderOptions};
use crate::{host, sensors};

/// Optical media filesystems never reported as storage on desktop platforms.
pub(crate) const OPTICAL_FS: [&str; 4] = ["cdfs", "cd9660", "udf", "iso9660"];

/// Desktop exclusion rule: drives without a filesystem type and optical media.
pub(crate) fn is_desktop_excluded(entry: &MountEntry) -> bool {
    entry.fs_type.is_empty() || OPTICAL_FS.contains(&entry.fs_type.as_str())
}

#[derive(Debug, Clone, Default)]
pub struct WindowsProvider {
    options: ProviderOptions,
}

impl WindowsProvider {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

/// Release number only (`"11"` out of `"11 (22631)"`).
fn release(os_version: Option<String>) -> String {
    os_version
        .as_deref()
        .and_then(|v| v.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

impl DeviceProvider for WindowsProvider {
    fn tag(&self) -> PlatformTag {
        PlatformTag::Windows
    }

    async fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(
            PlatformTag::Windows,
            "Windows",
            release(host::os_version()),
            host::hostname(),
            host::architecture(),
            host::processor(),
        )
    }

    async fn battery_info(&self) -> BatteryInfo {
        sensor_info(sensors::read_battery(self.options.command_timeout).await)
    }

    async fn storage_info(&self, _path: Option<&Path>) -> Vec<StorageInfo> {
        collect_storage(mounts(), is_desktop_excluded)
    }

    async fn memory_info(&self) -> MemoryInfo {
        let m = host::memory();
        MemoryInfo::from_counters(m.total, m.available, m.used, m.swap())
    }
}
