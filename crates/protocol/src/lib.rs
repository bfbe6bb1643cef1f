//! Wire types for DeviceMCP.
//!
//! Holds the normalized device records every platform provider produces,
//! the display formatting helpers, the response reports returned by the
//! tool surface, and the JSON-RPC envelope used on the stdio transport.

pub mod constants;
pub mod envelope;
pub mod format;
pub mod messages;
pub mod reports;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{Method, ToolName};
pub use envelope::{Request, Response, RpcError};
pub use reports::{BatteryReport, MemoryReport, StorageReport, SystemSummary};
pub use types::{
    BatteryInfo, DeviceInfo, MemoryInfo, PlatformTag, StorageInfo, UNKNOWN,
    UnknownPlatformTag,
};
