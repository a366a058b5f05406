//! Structured errors raised by the server layer itself.
//!
//! Library failures arrive as `folio_core::Error` and convert on their own;
//! these cover what only the tool surface can get wrong.

use rmcp::model::{ErrorCode, ErrorData as McpError};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool output could not be encoded.
    #[error("SERIALIZE_FAILED: {0}")]
    SerializeFailed(String),

    /// The named cache set does not exist.
    #[error("UNKNOWN_CACHE: {0}")]
    UnknownCache(String),
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let (code, message) = match &err {
            ToolError::SerializeFailed(msg) => (-32000, msg.clone()),
            ToolError::UnknownCache(name) => (-32602, format!("unknown cache set: {name}")),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::SerializeFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err: McpError = ToolError::UnknownCache("folio-static-v0".into()).into();
        assert_eq!(err.code, ErrorCode(-32602));
        assert!(err.message.contains("folio-static-v0"));

        let err: McpError = ToolError::SerializeFailed("bad".into()).into();
        assert_eq!(err.code, ErrorCode(-32000));
    }
}
