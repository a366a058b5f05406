//! MCP tool implementations.
//!
//! This module contains all tools exposed by the folio server. Every tool
//! answers with pretty-printed JSON in a single text content block.

pub mod assistant_ask;
pub mod cache;
pub mod site_fetch;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

/// Longest body preview returned by the fetch and cache tools, in characters.
pub const PREVIEW_CHARS: usize = 2000;

pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(ToolError::from)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Lossy UTF-8 preview of a body, cut at a char boundary.
pub(crate) fn body_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
pub(crate) fn output_json<T: serde::de::DeserializeOwned>(result: &CallToolResult) -> T {
    let content_val = serde_json::to_value(&result.content[0]).unwrap();
    let text = content_val
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
