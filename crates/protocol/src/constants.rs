use serde::{Deserialize, Serialize};

/// Name the server reports in the `initialize` handshake.
pub const SERVER_NAME: &str = "DeviceMCP";

/// Tool protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC version string carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC method identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    // Lifecycle
    #[serde(rename = "initialize")]
    Initialize,
    #[serde(rename = "notifications/initialized")]
    Initialized,
    #[serde(rename = "notifications/cancelled")]
    Cancelled,
    #[serde(rename = "ping")]
    Ping,

    // Tools
    #[serde(rename = "tools/list")]
    ToolsList,
    #[serde(rename = "tools/call")]
    ToolsCall,

    /// Forward compatibility: unknown methods deserialize here.
    #[serde(other)]
    Unknown,
}

/// The five operations exposed on the tool surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetDeviceInfo,
    GetBatteryLevel,
    GetStorageInfo,
    GetMemoryInfo,
    GetSystemSummary,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::GetDeviceInfo,
        ToolName::GetBatteryLevel,
        ToolName::GetStorageInfo,
        ToolName::GetMemoryInfo,
        ToolName::GetSystemSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetDeviceInfo => "get_device_info",
            ToolName::GetBatteryLevel => "get_battery_level",
            ToolName::GetStorageInfo => "get_storage_info",
            ToolName::GetMemoryInfo => "get_memory_info",
            ToolName::GetSystemSummary => "get_system_summary",
        }
    }

    /// Looks a tool up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Description shown to clients in `tools/list`.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GetDeviceInfo => {
                "Get device information: OS name and version, hostname, architecture, \
                 processor and platform identifier (windows, macos, linux, android)."
            }
            ToolName::GetBatteryLevel => {
                "Get battery information: charge percentage, charging and plug state, \
                 estimated time remaining, and whether the device has a battery at all."
            }
            ToolName::GetStorageInfo => {
                "Get storage information for every mounted drive or partition: total, \
                 used and free bytes, usage percentage and mount point."
            }
            ToolName::GetMemoryInfo => {
                "Get memory (RAM) information: total, available and used bytes, usage \
                 percentage, and swap totals when swap is configured."
            }
            ToolName::GetSystemSummary => {
                "Get a summary of all device information in one call: platform, device, \
                 battery, storage and memory."
            }
        }
    }
}

/// JSON-RPC error codes.
pub const RPC_PARSE_ERROR: i32 = -32700;
pub const RPC_INVALID_REQUEST: i32 = -32600;
pub const RPC_METHOD_NOT_FOUND: i32 = -32601;
pub const RPC_INVALID_PARAMS: i32 = -32602;
pub const RPC_INTERNAL_ERROR: i32 = -32603;
