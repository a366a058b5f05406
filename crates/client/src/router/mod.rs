//! Offline asset caching router.
//!
//! ### Lifecycle
//! `CacheRouter::new` → [`CacheRouter::install`] → [`InstalledRouter::activate`]
//! → [`ActiveRouter`]. Each step consumes the previous stage, so a router
//! that has not finished installing (or pruning) cannot intercept anything.
//!
//! ### Policies
//! | category | policy | written to |
//! |---|---|---|
//! | navigation | network-first; exact cache hit, then offline shell on failure | runtime |
//! | image | cache-first | images |
//! | static asset | stale-while-revalidate; a miss waits for the network | runtime |
//!
//! Only 2xx responses are stored, unlike a browser service worker that
//! caches whatever response resolves (404 pages included). Storage write
//! failures are logged and never change the response handed back. Navigation
//! writes run in the background; [`ActiveRouter::settle`] waits for them.

mod request;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

pub use request::{Category, Destination, RequestMode, RouteRequest, classify};

use crate::fetch::{Network, canonicalize, resolve_path};
use folio_core::{AppConfig, CacheNames, CacheStorage, CachedResponse, Error};

/// Everything the router needs to know about the deployment.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub cache_names: CacheNames,
    pub origin: Url,
    /// Site paths fetched into the static set at install.
    pub precache: Vec<String>,
    /// Site path served when a navigation fails with no exact hit.
    pub offline_fallback: String,
    pub static_prefix: String,
}

impl RouterConfig {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        let origin = canonicalize(&config.origin).map_err(|e| Error::InvalidUrl(format!("origin: {e}")))?;
        Ok(Self {
            cache_names: config.cache_names(),
            origin,
            precache: config.precache.clone(),
            offline_fallback: config.offline_fallback.clone(),
            static_prefix: config.static_prefix.clone(),
        })
    }

    fn site_url(&self, path: &str) -> Result<Url, Error> {
        resolve_path(&self.origin, path).map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

/// Where a routed response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Network,
    Cache,
    /// The cached offline shell, served in place of a failed navigation.
    OfflineFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub response: CachedResponse,
    pub source: ResponseSource,
    /// `None` when the request bypassed the router.
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
    /// Not categorized; the caller sends the request itself.
    PassThrough,
    Respond(Routed),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ActivationReport {
    /// Sets removed because they are not in the allow-list.
    pub deleted: Vec<String>,
    /// Allow-listed sets that exist after pruning.
    pub kept: Vec<String>,
}

struct Shared {
    config: RouterConfig,
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
}

impl Shared {
    /// Best-effort write. Non-2xx responses are skipped.
    async fn store(&self, cache: &str, response: &CachedResponse) {
        if !response.is_success() {
            tracing::debug!(cache, url = %response.url, status = response.status, "not caching non-2xx response");
            return;
        }
        if let Err(e) = self.storage.put(cache, response).await {
            tracing::warn!(cache, url = %response.url, error = %e, "cache write failed");
        }
    }

    /// Lookup across every set. A storage error counts as a miss.
    async fn lookup(&self, method: &str, url: &str) -> Option<CachedResponse> {
        match self.storage.match_any(method, url).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(url, error = %e, "cache lookup failed");
                None
            }
        }
    }
}

/// A router that has not been installed yet.
pub struct CacheRouter {
    shared: Arc<Shared>,
}

impl CacheRouter {
    pub fn new(config: RouterConfig, storage: Arc<dyn CacheStorage>, network: Arc<dyn Network>) -> Self {
        Self { shared: Arc::new(Shared { config, storage, network }) }
    }

    /// Fetch the shell resources and store them in the static set.
    ///
    /// All precache fetches run concurrently and must all return 2xx;
    /// otherwise nothing is written and [`Error::InstallFailed`] is returned.
    pub async fn install(self) -> Result<InstalledRouter, Error> {
        let shared = &self.shared;
        let urls = shared
            .config
            .precache
            .iter()
            .map(|path| shared.config.site_url(path))
            .collect::<Result<Vec<_>, _>>()?;

        let fetches = urls.into_iter().map(|url| async move {
            let request = RouteRequest::get(url);
            let response = shared
                .network
                .fetch(&request)
                .await
                .map_err(|e| Error::InstallFailed(format!("{}: {e}", request.url)))?;
            if !response.is_success() {
                return Err(Error::InstallFailed(format!("{}: status {}", request.url, response.status)));
            }
            Ok(response)
        });
        let responses = futures_util::future::try_join_all(fetches).await?;

        let static_name = &shared.config.cache_names.static_name;
        shared
            .storage
            .open(static_name)
            .await
            .map_err(|e| Error::InstallFailed(format!("open {static_name}: {e}")))?;
        for response in &responses {
            shared
                .storage
                .put(static_name, response)
                .await
                .map_err(|e| Error::InstallFailed(format!("store {}: {e}", response.url)))?;
        }

        let precached: Vec<String> = responses.into_iter().map(|r| r.url).collect();
        tracing::info!(cache = %static_name, count = precached.len(), "installed shell resources");

        Ok(InstalledRouter { shared: self.shared, precached })
    }
}

/// Installed, waiting to take over from the previous generation.
pub struct InstalledRouter {
    shared: Arc<Shared>,
    precached: Vec<String>,
}

impl InstalledRouter {
    /// URLs written to the static set during install.
    pub fn precached(&self) -> &[String] {
        &self.precached
    }

    /// Delete every set outside the allow-list, then start intercepting.
    pub async fn activate(self) -> Result<(ActiveRouter, ActivationReport), Error> {
        let names = &self.shared.config.cache_names;
        let mut report = ActivationReport::default();

        for name in self.shared.storage.keys().await? {
            if names.is_allowed(&name) {
                report.kept.push(name);
            } else {
                self.shared.storage.delete(&name).await?;
                report.deleted.push(name);
            }
        }

        tracing::info!(deleted = ?report.deleted, kept = ?report.kept, "activated");

        Ok((ActiveRouter { shared: self.shared, pending: Mutex::new(Vec::new()) }, report))
    }
}

/// A router that intercepts requests.
pub struct ActiveRouter {
    shared: Arc<Shared>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ActiveRouter {
    pub fn config(&self) -> &RouterConfig {
        &self.shared.config
    }

    pub fn storage(&self) -> &Arc<dyn CacheStorage> {
        &self.shared.storage
    }

    /// Route one request according to its category.
    pub async fn handle(&self, request: &RouteRequest) -> Result<Intercept, Error> {
        let Some(category) = classify(request, &self.shared.config.static_prefix) else {
            tracing::debug!(method = %request.method, url = %request.url, "bypass");
            return Ok(Intercept::PassThrough);
        };

        tracing::debug!(?category, url = %request.url, "intercept");

        let routed = match category {
            Category::Navigation => self.network_first(request).await?,
            Category::Image => self.cache_first(request).await?,
            Category::StaticAsset => self.stale_while_revalidate(request).await?,
        };

        Ok(Intercept::Respond(Routed { category: Some(category), ..routed }))
    }

    /// Like [`ActiveRouter::handle`], but performs pass-through fetches too.
    pub async fn respond(&self, request: &RouteRequest) -> Result<Routed, Error> {
        match self.handle(request).await? {
            Intercept::Respond(routed) => Ok(routed),
            Intercept::PassThrough => {
                let response = self.shared.network.fetch(request).await?;
                Ok(Routed { response, source: ResponseSource::Network, category: None })
            }
        }
    }

    /// Wait for background revalidations and navigation writes started so
    /// far. Returns how many were awaited.
    pub async fn settle(&self) -> usize {
        let handles = std::mem::take(&mut *self.pending.lock().await);
        let count = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background task failed");
            }
        }
        count
    }

    async fn network_first(&self, request: &RouteRequest) -> Result<Routed, Error> {
        let shared = &self.shared;
        match shared.network.fetch(request).await {
            Ok(response) => {
                self.store_in_background(shared.config.cache_names.runtime_name.clone(), response.clone())
                    .await;
                Ok(routed(response, ResponseSource::Network))
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "navigation failed, trying cache");

                if let Some(hit) = shared.lookup(&request.method, &request.cache_url()).await {
                    return Ok(routed(hit, ResponseSource::Cache));
                }

                let fallback = shared.config.site_url(&shared.config.offline_fallback)?;
                if let Some(shell) = shared.lookup("GET", fallback.as_str()).await {
                    return Ok(routed(shell, ResponseSource::OfflineFallback));
                }

                Err(err)
            }
        }
    }

    async fn cache_first(&self, request: &RouteRequest) -> Result<Routed, Error> {
        let shared = &self.shared;
        if let Some(hit) = shared.lookup(&request.method, &request.cache_url()).await {
            return Ok(routed(hit, ResponseSource::Cache));
        }

        let response = shared.network.fetch(request).await?;
        shared.store(&shared.config.cache_names.images_name, &response).await;
        Ok(routed(response, ResponseSource::Network))
    }

    async fn stale_while_revalidate(&self, request: &RouteRequest) -> Result<Routed, Error> {
        let shared = Arc::clone(&self.shared);
        let owned = request.clone();
        let revalidation = tokio::spawn(async move {
            let response = shared.network.fetch(&owned).await?;
            shared.store(&shared.config.cache_names.runtime_name, &response).await;
            Ok::<_, Error>(response)
        });

        if let Some(hit) = self.shared.lookup(&request.method, &request.cache_url()).await {
            let url = request.url.clone();
            let background = tokio::spawn(async move {
                match revalidation.await {
                    Ok(Ok(_)) => tracing::debug!(%url, "revalidated"),
                    Ok(Err(e)) => tracing::debug!(%url, error = %e, "revalidation failed"),
                    Err(e) => tracing::warn!(%url, error = %e, "revalidation task failed"),
                }
            });
            self.track(background).await;
            return Ok(routed(hit, ResponseSource::Cache));
        }

        match revalidation.await {
            Ok(result) => result.map(|response| routed(response, ResponseSource::Network)),
            Err(e) => Err(Error::Network(format!("fetch task failed: {e}"))),
        }
    }

    async fn store_in_background(&self, cache: String, response: CachedResponse) {
        let shared = Arc::clone(&self.shared);
        let write = tokio::spawn(async move { shared.store(&cache, &response).await });
        self.track(write).await;
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().await;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

fn routed(response: CachedResponse, source: ResponseSource) -> Routed {
    Routed { response, source, category: None }
}
