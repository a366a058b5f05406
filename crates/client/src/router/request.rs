//! Intercepted requests and their classification.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::fetch::canonicalize;
use folio_core::Error;

/// How the request was initiated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    /// Top-level document load.
    Navigate,
    #[default]
    SameOrigin,
    NoCors,
    Cors,
}

/// What the response will be used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Document,
    Image,
    Script,
    Style,
    Font,
    Manifest,
    #[default]
    Empty,
}

/// Caching policy bucket. Requests without one bypass the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Network-first with the cached-page and offline-shell fallbacks.
    Navigation,
    /// Cache-first.
    Image,
    /// Stale-while-revalidate.
    StaticAsset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub method: String,
    pub url: Url,
    pub mode: RequestMode,
    pub destination: Destination,
}

impl RouteRequest {
    /// A plain GET with no particular destination.
    pub fn get(url: Url) -> Self {
        Self { method: "GET".into(), url, mode: RequestMode::default(), destination: Destination::default() }
    }

    /// A top-level document load.
    pub fn navigate(url: Url) -> Self {
        Self { mode: RequestMode::Navigate, destination: Destination::Document, ..Self::get(url) }
    }

    /// Build a request from loosely typed input; the URL is canonicalized.
    pub fn parse(method: &str, url: &str, mode: RequestMode, destination: Destination) -> Result<Self, Error> {
        let method = method.trim().to_ascii_uppercase();
        if method.is_empty() {
            return Err(Error::InvalidInput("method must not be empty".into()));
        }
        let url = canonicalize(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self { method, url, mode, destination })
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    /// The URL the cache is keyed by: the request URL without its fragment.
    pub fn cache_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.into()
    }
}

/// Pick the policy for a request. First match wins:
///
/// 1. not GET: bypass
/// 2. not http(s): bypass
/// 3. navigation: [`Category::Navigation`]
/// 4. image destination: [`Category::Image`]
/// 5. script/style/font, or a path under `static_prefix`: [`Category::StaticAsset`]
/// 6. anything else: bypass
pub fn classify(request: &RouteRequest, static_prefix: &str) -> Option<Category> {
    if !request.method.eq_ignore_ascii_case("GET") {
        return None;
    }

    if !matches!(request.url.scheme(), "http" | "https") {
        return None;
    }

    if request.mode == RequestMode::Navigate {
        return Some(Category::Navigation);
    }

    match request.destination {
        Destination::Image => Some(Category::Image),
        Destination::Script | Destination::Style | Destination::Font => Some(Category::StaticAsset),
        _ if request.url.path().starts_with(static_prefix) => Some(Category::StaticAsset),
        _ => None,
    }
}
