//! cache_sets tool implementation.

use folio_core::{CacheDb, CacheNames, CacheStorage};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::json_result;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheSetInfo {
    pub name: String,
    pub entries: u64,
    /// Whether the set belongs to the current generation.
    pub allowed: bool,
}

/// Output from the cache_sets tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheSetsOutput {
    /// Existing sets in creation order.
    pub sets: Vec<CacheSetInfo>,
}

/// Implementation of the cache_sets tool.
pub async fn sets_impl(cache: &CacheDb, names: &CacheNames) -> Result<CallToolResult, McpError> {
    let mut sets = Vec::new();
    for name in cache.keys().await? {
        let entries = cache.entry_count(&name).await?;
        sets.push(CacheSetInfo { allowed: names.is_allowed(&name), name, entries });
    }

    json_result(&CacheSetsOutput { sets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::output_json;
    use folio_core::{AppConfig, CachedResponse};

    #[tokio::test]
    async fn test_lists_sets_with_counts() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let names = AppConfig::default().cache_names();

        cache.open_set(&names.static_name).await.unwrap();
        cache.open_set("folio-static-v0").await.unwrap();
        for path in ["/", "/index.html"] {
            let entry = CachedResponse::new("GET", format!("https://folio.dev{path}"), 200, vec![], vec![]);
            cache.put_entry(&names.static_name, &entry).await.unwrap();
        }

        let output: CacheSetsOutput = output_json(&sets_impl(&cache, &names).await.unwrap());
        assert_eq!(output.sets.len(), 2);
        assert_eq!(output.sets[0].name, "folio-static-v1");
        assert_eq!(output.sets[0].entries, 2);
        assert!(output.sets[0].allowed);
        assert_eq!(output.sets[1].name, "folio-static-v0");
        assert!(!output.sets[1].allowed);
    }

    #[tokio::test]
    async fn test_empty() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let output: CacheSetsOutput = output_json(&sets_impl(&cache, &AppConfig::default().cache_names()).await.unwrap());
        assert!(output.sets.is_empty());
    }
}
