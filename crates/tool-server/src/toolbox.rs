//! The five tool operations over an injected provider.

use devicemcp_protocol::format::format_percentage;
use devicemcp_protocol::{
    BatteryReport, DeviceInfo, MemoryReport, StorageReport, SystemSummary, ToolName,
};
use devicemcp_telemetry::DeviceProvider;

/// Tool operations bound to one provider for the life of the process.
#[derive(Debug, Clone)]
pub struct Toolbox<P: DeviceProvider> {
    provider: P,
}

impl<P: DeviceProvider> Toolbox<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// OS identity of the host.
    pub async fn get_device_info(&self) -> DeviceInfo {
        self.provider.device_info().await
    }

    /// Battery state plus `time_remaining_formatted`.
    pub async fn get_battery_level(&self) -> BatteryReport {
        let battery = self.provider.battery_info().await;
        if let Some(pct) = battery.percentage {
            tracing::debug!(percentage = %format_percentage(pct), "battery read");
        }
        BatteryReport::from(battery)
    }

    /// Every eligible mount with formatted sizes.
    pub async fn get_storage_info(&self) -> Vec<StorageReport> {
        let storage = self.provider.storage_info(None).await;
        tracing::debug!(mounts = storage.len(), "storage read");
        storage.into_iter().map(StorageReport::from).collect()
    }

    /// Memory counters with formatted sizes.
    pub async fn get_memory_info(&self) -> MemoryReport {
        let memory = self.provider.memory_info().await;
        tracing::debug!(usage = %format_percentage(memory.usage_percent), "memory read");
        MemoryReport::from(memory)
    }

    /// All four reports in one record. `platform` is detected at call time.
    pub async fn get_system_summary(&self) -> SystemSummary {
        SystemSummary {
            platform: devicemcp_telemetry::detect(),
            device: self.get_device_info().await,
            battery: self.get_battery_level().await,
            storage: self.get_storage_info().await,
            memory: self.get_memory_info().await,
        }
    }

    /// Runs `tool` and returns its output as JSON.
    pub async fn call(&self, tool: ToolName) -> Result<serde_json::Value, serde_json::Error> {
        tracing::debug!(tool = tool.as_str(), "tool call");
        match tool {
            ToolName::GetDeviceInfo => serde_json::to_value(self.get_device_info().await),
            ToolName::GetBatteryLevel => serde_json::to_value(self.get_battery_level().await),
            ToolName::GetStorageInfo => serde_json::to_value(self.get_storage_info().await),
            ToolName::GetMemoryInfo => serde_json::to_value(self.get_memory_info().await),
            ToolName::GetSystemSummary => serde_json::to_value(self.get_system_summary().await),
        }
    }
}
