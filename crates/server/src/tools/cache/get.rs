//! cache_get tool implementation.
//!
//! Looks up a stored response by method and URL.

use folio_client::canonicalize;
use folio_core::{CacheDb, CacheStorage, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{body_preview, json_result};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// URL of the stored response.
    pub url: String,

    /// Request method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,

    /// Restrict the lookup to one cache set; otherwise every set is searched
    /// in creation order.
    #[serde(default)]
    pub cache: Option<String>,
}

fn default_method() -> String {
    "GET".into()
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub key: String,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub stored_at: String,
    pub bytes: usize,
    pub body_preview: String,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(cache: &CacheDb, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let url = canonicalize(&params.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let method = params.method.trim().to_ascii_uppercase();

    let found = match &params.cache {
        Some(name) => cache.match_in(name, &method, url.as_str()).await?,
        None => cache.match_any(&method, url.as_str()).await?,
    };
    let entry = found.ok_or_else(|| Error::CacheMiss(format!("{method} {url}")))?;

    json_result(&CacheGetOutput {
        key: entry.key(),
        bytes: entry.body.len(),
        body_preview: body_preview(&entry.body),
        method: entry.method,
        url: entry.url,
        status: entry.status,
        headers: entry.headers,
        stored_at: entry.stored_at,
    })
}
