//! Device telemetry providers for DeviceMCP.
//!
//! Detects which platform family the process runs on, builds the matching
//! provider once, and answers the four queries (device identity, battery,
//! storage, memory) as normalized records. Missing data is never an error:
//! it shows up as `None`, an empty list or `"Unknown"`.

mod battery;
mod command;
mod detect;
mod disks;
mod host;
mod provider;
mod provider_android;
mod provider_linux;
mod provider_macos;
mod provider_windows;

#[cfg(any(target_os = "linux", target_os = "android"))]
#[path = "sensors_linux.rs"]
mod sensors;

#[cfg(target_os = "windows")]
#[path = "sensors_windows.rs"]
mod sensors;

#[cfg(target_os = "macos")]
#[path = "sensors_macos.rs"]
mod sensors;

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "windows",
    target_os = "macos"
)))]
#[path = "sensors_other.rs"]
mod sensors;

pub use detect::detect;
pub use provider::{
    DEFAULT_COMMAND_TIMEOUT, DeviceProvider, Provider, ProviderOptions, get_provider,
    get_provider_with,
};
pub use provider_android::AndroidProvider;
pub use provider_linux::LinuxProvider;
pub use provider_macos::MacOsProvider;
pub use provider_windows::WindowsProvider;

/// Errors produced while selecting a provider.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}
