use serde::{Deserialize, Serialize};

use crate::constants::{PROTOCOL_VERSION, SERVER_NAME, ToolName};

// ---------------------------------------------------------------------------
// Request params
// ---------------------------------------------------------------------------

/// Params of `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of `initialize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Handshake answer for this server build.
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: version.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// One entry of `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl From<ToolName> for ToolDescriptor {
    fn from(tool: ToolName) -> Self {
        // None of the tools take arguments.
        Self {
            name: tool.as_str().to_string(),
            description: tool.description().to_string(),
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
        }
    }
}

/// Result of `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDescriptor>,
}

impl ToolsListResult {
    /// Lists every tool on the surface.
    pub fn all() -> Self {
        Self {
            tools: ToolName::ALL.into_iter().map(ToolDescriptor::from).collect(),
        }
    }
}

/// A content block in a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Result of `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<serde_json::Value>,
    pub is_error: bool,
}

impl CallToolResult {
    /// Wraps a tool's JSON output. Structured content must be an object,
    /// so any other value is nested under `"result"`.
    pub fn from_output(output: serde_json::Value) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string(&output)?;
        let structured = if output.is_object() {
            output
        } else {
            serde_json::json!({ "result": output })
        };
        Ok(Self {
            content: vec![ContentBlock::Text { text }],
            structured_content: Some(structured),
            is_error: false,
        })
    }
}
