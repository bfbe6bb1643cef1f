//! Provider contract and factory.
//!
//! The platform set is closed: [`Provider`] is an enum over the four
//! variants and the factory maps a tag to one of them. Providers hold no
//! mutable state, so a single instance built at startup serves every query.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use devicemcp_protocol::{BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo};

use crate::TelemetryError;
use crate::provider_android::AndroidProvider;
use crate::provider_linux::LinuxProvider;
use crate::provider_macos::MacOsProvider;
use crate::provider_windows::WindowsProvider;

/// Upper bound for external status commands (`getprop`, `pmset`, ...).
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables shared by every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderOptions {
    pub command_timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

/// The four-query telemetry contract.
///
/// No method fails: unavailable values are `None`, an empty list or
/// `"Unknown"`.
pub trait DeviceProvider: Send + Sync + 'static {
    /// Platform this provider reports as.
    fn tag(&self) -> PlatformTag;

    fn device_info(&self) -> impl Future<Output = DeviceInfo> + Send;

    fn battery_info(&self) -> impl Future<Output = BatteryInfo> + Send;

    /// Lists eligible mounted filesystems. `path` is accepted but does not
    /// restrict the result.
    fn storage_info(&self, path: Option<&Path>) -> impl Future<Output = Vec<StorageInfo>> + Send;

    fn memory_info(&self) -> impl Future<Output = MemoryInfo> + Send;
}

/// A provider for one of the supported platform families.
#[derive(Debug, Clone)]
pub enum Provider {
    Windows(WindowsProvider),
    MacOs(MacOsProvider),
    Linux(LinuxProvider),
    Android(AndroidProvider),
}

impl Provider {
    /// Builds the provider for `tag`.
    pub fn new(tag: PlatformTag, options: ProviderOptions) -> Self {
        match tag {
            PlatformTag::Windows => Provider::Windows(WindowsProvider::new(options)),
            PlatformTag::MacOs => Provider::MacOs(MacOsProvider::new(options)),
            PlatformTag::Linux => Provider::Linux(LinuxProvider::new(options)),
            PlatformTag::Android => Provider::Android(AndroidProvider::new(options)),
        }
    }
}

impl DeviceProvider for Provider {
    fn tag(&self) -> PlatformTag {
        match self {
            Provider::Windows(p) => p.tag(),
            Provider::MacOs(p) => p.tag(),
            Provider::Linux(p) => p.tag(),
            Provider::Android(p) => p.tag(),
        }
    }

    async fn device_info(&self) -> DeviceInfo {
        match self {
            Provider::Windows(p) => p.device_info().await,
            Provider::MacOs(p) => p.device_info().await,
            Provider::Linux(p) => p.device_info().await,
            Provider::Android(p) => p.device_info().await,
        }
    }

    async fn battery_info(&self) -> BatteryInfo {
        match self {
            Provider::Windows(p) => p.battery_info().await,
            Provider::MacOs(p) => p.battery_info().await,
            Provider::Linux(p) => p.battery_info().await,
            Provider::Android(p) => p.battery_info().await,
        }
    }

    async fn storage_info(&self, path: Option<&Path>) -> Vec<StorageInfo> {
        match self {
            Provider::Windows(p) => p.storage_info(path).await,
            Provider::MacOs(p) => p.storage_info(path).await,
            Provider::Linux(p) => p.storage_info(path).await,
            Provider::Android(p) => p.storage_info(path).await,
        }
    }

    async fn memory_info(&self) -> MemoryInfo {
        match self {
            Provider::Windows(p) => p.memory_info().await,
            Provider::MacOs(p) => p.memory_info().await,
            Provider::Linux(p) => p.memory_info().await,
            Provider::Android(p) => p.memory_info().await,
        }
    }
}

/// Returns the provider for `platform`, or for the detected platform when
/// `None`. The tag is matched case-insensitively.
pub fn get_provider(platform: Option<&str>) -> Result<Provider, TelemetryError> {
    get_provider_with(platform, ProviderOptions::default())
}

/// Like [`get_provider`] with explicit options.
pub fn get_provider_with(
    platform: Option<&str>,
    options: ProviderOptions,
) -> Result<Provider, TelemetryError> {
    let tag = match platform {
        Some(name) => name
            .parse::<PlatformTag>()
            .map_err(|e| TelemetryError::UnsupportedPlatform(e.0))?,
        None => crate::detect(),
    };
    tracing::info!(platform = %tag, explicit = platform.is_some(), "telemetry provider selected");
    Ok(Provider::new(tag, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tags_build_matching_providers() {
        for name in ["windows", "macos", "linux", "android"] {
            let provider = get_provider(Some(name)).unwrap();
            assert_eq!(provider.tag().as_str(), name);
        }
    }

    #[test]
    fn tags_are_case_insensitive() {
        let provider = get_provider(Some("MacOS")).unwrap();
        assert_eq!(provider.tag(), PlatformTag::MacOs);
        assert!(matches!(provider, Provider::MacOs(_)));
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        for name in ["freebsd", "", "ios", "linux2"] {
            let err = get_provider(Some(name)).unwrap_err();
            assert!(matches!(err, TelemetryError::UnsupportedPlatform(_)));
            assert!(err.to_string().starts_with("unsupported platform"));
        }
    }

    #[test]
    fn detected_provider() {
        let provider = get_provider(None).unwrap();
        assert_eq!(provider.tag(), crate::detect());
    }

    #[test]
    fn default_options() {
        assert_eq!(ProviderOptions::default().command_timeout, Duration::from_secs(5));
    }

    fn fast_options() -> ProviderOptions {
        ProviderOptions {
            command_timeout: Duration::from_millis(500),
        }
    }

    #[tokio::test]
    async fn device_info_reports_construction_tag() {
        for tag in PlatformTag::ALL {
            let provider = Provider::new(tag, fast_options());
            let info = provider.device_info().await;
            assert_eq!(info.platform, tag);
            for field in [
                &info.os_name,
                &info.os_version,
                &info.hostname,
                &info.architecture,
                &info.processor,
            ] {
                assert!(!field.is_empty(), "empty field on {tag}: {info:?}");
            }
        }
    }

    #[tokio::test]
    async fn battery_invariants() {
        for tag in PlatformTag::ALL {
            let b = Provider::new(tag, fast_options()).battery_info().await;
            if b.has_battery {
                let pct = b.percentage.unwrap();
                assert!((0.0..=100.0).contains(&pct));
                assert!(b.is_charging.is_some());
                assert!(b.is_plugged.is_some());
            } else {
                assert!(b.percentage.is_none());
                assert!(b.is_charging.is_none());
                assert!(b.is_plugged.is_none());
                assert!(b.time_remaining.is_none());
            }
        }
    }

    #[tokio::test]
    async fn storage_invariants() {
        for tag in PlatformTag::ALL {
            let provider = Provider::new(tag, fast_options());
            for s in provider.storage_info(None).await {
                assert!(s.total_bytes > 0);
                assert!((0.0..=100.0).contains(&s.usage_percent));
                assert!(!s.mount_point.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn storage_path_is_ignored() {
        let provider = Provider::new(crate::detect(), fast_options());
        let all = provider.storage_info(None).await;
        let filtered = provider.storage_info(Some(Path::new("/"))).await;
        let mounts = |v: &[StorageInfo]| v.iter().map(|s| s.mount_point.clone()).collect::<Vec<_>>();
        assert_eq!(mounts(&all), mounts(&filtered));
    }

    #[tokio::test]
    async fn memory_invariants() {
        for tag in PlatformTag::ALL {
            let m = Provider::new(tag, fast_options()).memory_info().await;
            assert!(m.total_bytes > 0);
            assert!((0.0..=100.0).contains(&m.usage_percent));
            assert_eq!(m.swap_total_bytes.is_some(), m.swap_used_bytes.is_some());
        }
    }

    #[tokio::test]
    async fn desktop_providers_always_report_swap() {
        for tag in [PlatformTag::Windows, PlatformTag::MacOs] {
            let m = Provider::new(tag, fast_options()).memory_info().await;
            assert!(m.swap_total_bytes.is_some());
        }
    }
}
