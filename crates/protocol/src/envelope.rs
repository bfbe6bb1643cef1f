use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

use crate::constants::{JSONRPC_VERSION, Method};

/// Error details in a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

/// Incoming JSON-RPC request or notification.
///
/// A request without an `id` member is a notification and never gets a
/// response; `"id": null` is still a request. `params` stays raw until the
/// method handler knows its shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<serde_json::Value>,
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Box<RawValue>>,
}

impl Request {
    /// Creates a new request with the given method and params.
    pub fn new<T: Serialize>(
        id: Option<serde_json::Value>,
        method: Method,
        params: Option<&T>,
    ) -> Result<Self, serde_json::Error> {
        let raw = match params {
            Some(p) => Some(serde_json::value::to_raw_value(p)?),
            None => None,
        };
        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method,
            params: raw,
        })
    }

    /// Returns `true` for notifications (no `id` member).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Deserializes the params into the given type.
    pub fn parse_params<T: for<'de> Deserialize<'de>>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        match &self.params {
            Some(raw) => Ok(Some(serde_json::from_str(raw.get())?)),
            None => Ok(None),
        }
    }

    /// Creates a success response for this request.
    pub fn reply<T: Serialize>(&self, result: &T) -> Result<Response, serde_json::Error> {
        Response::success(self.id.clone().unwrap_or_default(), result)
    }

    /// Creates an error response for this request.
    pub fn reply_error(&self, code: i32, message: impl Into<String>) -> Response {
        Response::error(self.id.clone().unwrap_or_default(), code, message)
    }
}

/// Keeps an explicit `null` id as `Some(Value::Null)`; only a missing
/// member falls back to `None` through `#[serde(default)]`.
fn present_id<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Outgoing JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Creates a success response.
    pub fn success<T: Serialize>(
        id: serde_json::Value,
        result: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(serde_json::to_value(result)?),
            error: None,
        })
    }

    /// Creates an error response. Use a `null` id when the request id
    /// could not be read.
    pub fn error(id: serde_json::Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}
