//! cache_purge tool implementation.
//!
//! Trims one cache set down to its newest entries. Nothing calls this
//! automatically; sets otherwise only shrink when activation drops them.

use folio_core::{CacheDb, CacheStorage, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::tools::json_result;

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Name of the cache set, e.g. "folio-runtime-v1".
    pub cache: String,

    /// Keep only the newest N entries (LRU purge).
    pub max_entries: usize,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    /// Number of entries deleted.
    pub deleted: u64,
    /// Entries left in the set.
    pub remaining: u64,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(cache: &CacheDb, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    if params.cache.trim().is_empty() {
        return Err(Error::InvalidInput("cache must not be empty".into()).into());
    }

    if !cache.has(&params.cache).await? {
        return Err(ToolError::UnknownCache(params.cache).into());
    }

    let deleted = cache.purge_lru_entries(&params.cache, params.max_entries).await?;
    let remaining = cache.entry_count(&params.cache).await?;

    tracing::info!(cache = %params.cache, deleted, remaining, "purged cache set");

    json_result(&CachePurgeOutput { deleted, remaining })
}
