//! Runtime platform detection.
//!
//! Never fails: anything unrecognized is reported as `linux`.

use std::path::Path;

use devicemcp_protocol::PlatformTag;

/// Build property file present on every Android system image.
const ANDROID_BUILD_PROP: &str = "/system/build.prop";

/// Package marker of the Termux terminal emulator.
const TERMUX_MARKER: &str = "com.termux";

/// Kernel family the process was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KernelFamily {
    Linux,
    Darwin,
    Windows,
    Other,
}

impl KernelFamily {
    /// Maps a Rust target OS name (`std::env::consts::OS`) to its kernel family.
    pub(crate) fn from_os(os: &str) -> Self {
        match os {
            "linux" | "android" => KernelFamily::Linux,
            "macos" | "ios" => KernelFamily::Darwin,
            "windows" => KernelFamily::Windows,
            _ => KernelFamily::Other,
        }
    }
}

/// Evidence that a Linux kernel is actually hosting Android userland.
#[derive(Debug, Clone, Default)]
pub(crate) struct AndroidMarkers {
    /// `/system/build.prop` could be opened.
    pub build_prop_readable: bool,
    /// `ANDROID_ROOT` is set in the environment.
    pub android_root: bool,
    /// Install prefix, library search path and executable path.
    pub runtime_paths: Vec<String>,
}

impl AndroidMarkers {
    fn gather() -> Self {
        let mut runtime_paths: Vec<String> = ["PREFIX", "LD_LIBRARY_PATH"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .collect();
        if let Ok(exe) = std::env::current_exe() {
            runtime_paths.push(exe.to_string_lossy().into_owned());
        }

        Self {
            build_prop_readable: std::fs::File::open(Path::new(ANDROID_BUILD_PROP)).is_ok(),
            android_root: std::env::var_os("ANDROID_ROOT").is_some(),
            runtime_paths,
        }
    }

    fn runtime_is_android(&self) -> bool {
        self.android_root || self.runtime_paths.iter().any(|p| p.contains(TERMUX_MARKER))
    }
}

/// Detects the platform family of the running host.
pub fn detect() -> PlatformTag {
    let family = KernelFamily::from_os(std::env::consts::OS);
    let markers = if family == KernelFamily::Linux {
        AndroidMarkers::gather()
    } else {
        AndroidMarkers::default()
    };
    let tag = classify(family, &markers);
    tracing::debug!(os = std::env::consts::OS, platform = %tag, "platform detected");
    tag
}

/// Pure classification step of [`detect`].
pub(crate) fn classify(family: KernelFamily, markers: &AndroidMarkers) -> PlatformTag {
    match family {
        KernelFamily::Linux if markers.build_prop_readable => PlatformTag::Android,
        KernelFamily::Linux if markers.runtime_is_android() => PlatformTag::Android,
        KernelFamily::Linux => PlatformTag::Linux,
        KernelFamily::Darwin => PlatformTag::MacOs,
        KernelFamily::Windows => PlatformTag::Windows,
        KernelFamily::Other => PlatformTag::Linux,
    }
}
