//! Server configuration.
//!
//! Configuration is stored as TOML:
//! - `$DEVICEMCP_CONFIG` when set
//! - Linux/Android: `~/.config/devicemcp/config.toml`
//! - macOS: `~/Library/Application Support/devicemcp/config.toml`
//! - Windows: `%APPDATA%/devicemcp/config.toml`
//!
//! A missing file means defaults; the file is never written by the server.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DEVICEMCP_CONFIG";

const CONFIG_FILE: &str = "config.toml";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Platform tag to use instead of detection (`windows`, `macos`,
    /// `linux`, `android`).
    #[serde(default)]
    pub platform: Option<String>,

    /// Timeout for external status commands, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_command_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: None,
            command_timeout_secs: default_command_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        if config.command_timeout_secs == 0 {
            anyhow::bail!(
                "{}: command_timeout_secs must be at least 1",
                path.display()
            );
        }
        Ok(config)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

/// Returns the configuration file path.
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => default_config_dir().join(CONFIG_FILE),
    }
}

fn default_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata).join("devicemcp")
    }

    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("devicemcp")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config").join("devicemcp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.platform.is_none());
        assert_eq!(config.command_timeout_secs, 5);
        assert_eq!(config.command_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn config_partial_toml() {
        let config: Config = toml::from_str(r#"platform = "android""#).unwrap();
        assert_eq!(config.platform.as_deref(), Some("android"));
        assert_eq!(config.command_timeout_secs, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = Config {
            platform: Some("macos".into()),
            command_timeout_secs: 2,
            log_level: "debug".into(),
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_file_uses_defaults_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!path.exists());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "command_timeout_secs = 1\nlog_level = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.command_timeout(), Duration::from_secs(1));
        assert_eq!(config.log_level, "warn");
        assert!(config.platform.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "command_timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "command_timeout_secs = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("command_timeout_secs"));
    }

    #[test]
    fn config_path_not_empty() {
        let path = config_path();
        assert!(path.to_string_lossy().ends_with(".toml"));
    }
}
