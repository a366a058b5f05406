//! site_fetch tool implementation.
//!
//! Sends one request through the active cache router and reports where the
//! response came from.

use folio_client::{ActiveRouter, Category, Destination, RequestMode, ResponseSource, RouteRequest};
use folio_core::Error;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{body_preview, json_result};

/// Input parameters for site_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SiteFetchParams {
    /// The URL to request.
    pub url: String,

    /// HTTP method (default: GET). Anything but GET bypasses the cache.
    #[serde(default = "default_method")]
    pub method: String,

    /// Request mode; "navigate" marks a top-level document load.
    #[serde(default)]
    pub mode: Option<RequestMode>,

    /// Request destination, e.g. "image" or "script".
    #[serde(default)]
    pub destination: Option<Destination>,
}

fn default_method() -> String {
    "GET".into()
}

/// Output structure for site_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SiteFetchOutput {
    /// The URL the response is keyed by.
    pub url: String,
    pub status: u16,
    /// network, cache or offline_fallback.
    pub source: ResponseSource,
    /// Policy applied; absent when the request bypassed the router.
    pub category: Option<Category>,
    pub content_type: Option<String>,
    /// Body length in bytes.
    pub bytes: usize,
    /// Start of the body as text.
    pub body_preview: String,
}

/// Implementation of the site_fetch tool.
pub async fn fetch_impl(router: &ActiveRouter, params: SiteFetchParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let request = RouteRequest::parse(
        &params.method,
        &params.url,
        params.mode.unwrap_or_default(),
        params.destination.unwrap_or_default(),
    )?;

    let routed = router.respond(&request).await?;
    let response = &routed.response;

    tracing::debug!(url = %response.url, source = ?routed.source, status = response.status, "site_fetch");

    json_result(&SiteFetchOutput {
        url: response.url.clone(),
        status: response.status,
        source: routed.source,
        category: routed.category,
        content_type: response.content_type().map(str::to_string),
        bytes: response.body.len(),
        body_preview: body_preview(&response.body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::output_json;
    use async_trait::async_trait;
    use folio_client::{CacheRouter, Network, RouterConfig};
    use folio_core::{AppConfig, CacheDb, CachedResponse};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Serves a one-line body for every URL until switched off.
    #[derive(Default)]
    struct EchoNetwork {
        offline: AtomicBool,
    }

    #[async_trait]
    impl Network for EchoNetwork {
        async fn fetch(&self, request: &RouteRequest) -> Result<CachedResponse, Error> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(Error::Network("offline".into()));
            }
            let body = format!("body of {}", request.url.path()).into_bytes();
            Ok(CachedResponse::new(&request.method, request.cache_url(), 200, vec![("content-type".into(), "text/html".into())], body))
        }
    }

    async fn router(network: Arc<EchoNetwork>) -> ActiveRouter {
        let config = AppConfig { origin: "https://folio.dev".into(), ..Default::default() };
        let db = CacheDb::open_in_memory().await.unwrap();
        let router = CacheRouter::new(RouterConfig::from_app_config(&config).unwrap(), Arc::new(db), network);
        router.install().await.unwrap().activate().await.unwrap().0
    }

    fn params(url: &str) -> SiteFetchParams {
        SiteFetchParams { url: url.into(), method: default_method(), mode: None, destination: None }
    }

    #[tokio::test]
    async fn test_image_served_from_cache_second_time() {
        let router = router(Arc::new(EchoNetwork::default())).await;
        let image = SiteFetchParams { destination: Some(Destination::Image), ..params("https://folio.dev/photo.png") };

        let first: SiteFetchOutput = output_json(&fetch_impl(&router, image.clone()).await.unwrap());
        assert_eq!(first.source, ResponseSource::Network);
        assert_eq!(first.category, Some(Category::Image));

        let second: SiteFetchOutput = output_json(&fetch_impl(&router, image).await.unwrap());
        assert_eq!(second.source, ResponseSource::Cache);
        assert_eq!(second.body_preview, "body of /photo.png");
        assert_eq!(second.content_type.as_deref(), Some("text/html"));
    }

    #[tokio::test]
    async fn test_offline_navigation_gets_shell() {
        let network = Arc::new(EchoNetwork::default());
        let router = router(network.clone()).await;
        network.offline.store(true, Ordering::SeqCst);

        let nav = SiteFetchParams { mode: Some(RequestMode::Navigate), ..params("https://folio.dev/projects") };
        let output: SiteFetchOutput = output_json(&fetch_impl(&router, nav).await.unwrap());
        assert_eq!(output.source, ResponseSource::OfflineFallback);
        assert_eq!(output.url, "https://folio.dev/index.html");
    }

    #[tokio::test]
    async fn test_bypass_has_no_category() {
        let router = router(Arc::new(EchoNetwork::default())).await;
        let output: SiteFetchOutput = output_json(&fetch_impl(&router, params("https://folio.dev/api/ping")).await.unwrap());
        assert_eq!(output.category, None);
        assert_eq!(output.bytes, "body of /api/ping".len());
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let router = router(Arc::new(EchoNetwork::default())).await;
        assert!(fetch_impl(&router, params("  ")).await.is_err());
        assert!(fetch_impl(&router, params("ftp://folio.dev/x")).await.is_err());
    }
}
