//! Linux provider.

use std::path::Path;

use devicemcp_protocol::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo};

use crate::battery::sensor_info;
use crate::disks::{MountEntry, collect_storage, mounts};
use crate::provider::{DeviceProvider, ProviderOptions};
use crate::{host, sensors};

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Virtual filesystems that never represent real storage.
const EXCLUDED_FS: [&str; 4] = ["tmpfs", "devtmpfs", "squashfs", "overlay"];

fn is_excluded(entry: &MountEntry) -> bool {
    EXCLUDED_FS.contains(&entry.fs_type.as_str())
}

/// Distribution identity from `os-release`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Distro {
    pub name: String,
    pub version: String,
}

/// Parses `NAME` and `VERSION_ID` out of an `os-release` file.
///
/// Returns `None` when `NAME` is missing or blank.
pub(crate) fn parse_os_release(content: &str) -> Option<Distro> {
    let mut name = None;
    let mut version = String::new();
    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        match key {
            "NAME" if !value.is_empty() => name = Some(value.to_string()),
            "VERSION_ID" => version = value.to_string(),
            _ => {}
        }
    }
    name.map(|name| Distro { name, version })
}

/// `"<NAME> Linux"`, without doubling a trailing "Linux" (`Arch Linux`).
fn distro_display_name(name: &str) -> String {
    if name.to_lowercase().ends_with("linux") {
        name.to_string()
    } else {
        format!("{name} Linux")
    }
}

fn resolve_version(os_release: Option<&str>) -> (String, String) {
    match os_release.and_then(parse_os_release) {
        Some(d) => (distro_display_name(&d.name), d.version),
        None => (
            "Linux".to_string(),
            host::kernel_version().unwrap_or_default(),
        ),
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinuxProvider {
    options: ProviderOptions,
}

impl LinuxProvider {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }
}

impl DeviceProvider for LinuxProvider {
    fn tag(&self) -> PlatformTag {
        PlatformTag::Linux
    }

    async fn device_info(&self) -> DeviceInfo {
        let os_release = tokio::fs::read_to_string(OS_RELEASE_PATH).await.ok();
        let (os_name, os_version) = resolve_version(os_release.as_deref());
        tracing::debug!(%os_name, %os_version, "linux version resolved");
        DeviceInfo::new(
            PlatformTag::Linux,
            os_name,
            os_version,
            host::hostname(),
            host::architecture(),
            host::processor(),
        )
    }

    async fn battery_info(&self) -> BatteryInfo {
        sensor_info(sensors::read_battery(self.options.command_timeout).await)
    }

    async fn storage_info(&self, _path: Option<&Path>) -> Vec<StorageInfo> {
        collect_storage(mounts(), is_excluded)
    }

    async fn memory_info(&self) -> MemoryInfo {
        let m = host::memory();
        MemoryInfo::from_counters(m.total, m.available, m.used, m.swap_if_configured())
    }
}
