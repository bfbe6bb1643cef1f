//! macOS provider.

use std::path::Path;

use devicemcp_protocol::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo};

use crate::battery::sensor_info;
use crate::disks::{collect_storage, mounts};
use crate::provider::{DeviceProvider, ProviderOptions};
use crate::provider_windows::is_desktop_excluded;
use crate::{host, sensors};

#[derive(Debug, Clone, Default)]
pub struct MacOsProvider {
    options: ProviderOptions,
}

impl MacOsProvider {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl DeviceProvider for MacOsProvider {
    fn tag(&self) -> PlatformTag {
        PlatformTag::MacOs
    }

    async fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(
            PlatformTag::MacOs,
            "macOS",
            host::os_version().unwrap_or_default(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn device_info_is_macos() {
        let info = MacOsProvider::default().device_info().await;
        assert_eq!(info.os_name, "macOS");
        assert_eq!(info.platform, PlatformTag::MacOs);
    }

    #[tokio::test]
    async fn swap_always_reported() {
        let m = MacOsProvider::default().memory_info().await;
        assert!(m.swap_total_bytes.is_some());
        assert!(m.swap_used_bytes.is_some());
    }
}
