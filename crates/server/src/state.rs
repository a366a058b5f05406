//! Shared server state and startup sequence.

use std::sync::Arc;

use anyhow::{Context, Result};
use folio_client::{ActiveRouter, AssistantClient, CacheRouter, FetchClient, FetchConfig, RouterConfig};
use folio_core::{AppConfig, CacheDb};

pub struct AppState {
    pub config: AppConfig,
    pub db: CacheDb,
    pub router: ActiveRouter,
    /// `None` when no API key is configured; asking then yields a notice.
    pub assistant: Option<AssistantClient>,
}

impl AppState {
    /// Open the cache, install the shell and activate the router.
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let db = CacheDb::open(&config.db_path)
            .await
            .with_context(|| format!("opening cache database {}", config.db_path.display()))?;

        let network = FetchClient::new(FetchConfig::from_app_config(&config))?;
        let router = CacheRouter::new(RouterConfig::from_app_config(&config)?, Arc::new(db.clone()), Arc::new(network));

        let installed = router.install().await.context("install failed")?;
        let (router, report) = installed.activate().await.context("activate failed")?;
        tracing::info!(deleted = report.deleted.len(), kept = report.kept.len(), "cache router active");

        let assistant = match AssistantClient::from_app_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "assistant disabled");
                None
            }
        };

        Ok(Self { config, db, router, assistant })
    }
}
