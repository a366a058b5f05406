//! The storage seam the cache router is written against.

use async_trait::async_trait;

use super::{CacheDb, CachedResponse};
use crate::Error;

/// Key-addressable response storage grouped into named sets.
///
/// Mirrors the browser cache storage contract: sets are created lazily,
/// listed in creation order, and deleted wholesale.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    async fn open(&self, name: &str) -> Result<(), Error>;

    async fn keys(&self) -> Result<Vec<String>, Error>;

    async fn has(&self, name: &str) -> Result<bool, Error>;

    /// Returns whether the set existed.
    async fn delete(&self, name: &str) -> Result<bool, Error>;

    async fn put(&self, name: &str, response: &CachedResponse) -> Result<(), Error>;

    async fn match_in(&self, name: &str, method: &str, url: &str) -> Result<Option<CachedResponse>, Error>;

    /// First hit across all sets, oldest set first.
    async fn match_any(&self, method: &str, url: &str) -> Result<Option<CachedResponse>, Error>;
}

#[async_trait]
impl CacheStorage for CacheDb {
    async fn open(&self, name: &str) -> Result<(), Error> {
        self.open_set(name).await
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        self.set_names().await
    }

    async fn has(&self, name: &str) -> Result<bool, Error> {
        self.has_set(name).await
    }

    async fn delete(&self, name: &str) -> Result<bool, Error> {
        self.delete_set(name).await
    }

    async fn put(&self, name: &str, response: &CachedResponse) -> Result<(), Error> {
        self.put_entry(name, response).await
    }

    async fn match_in(&self, name: &str, method: &str, url: &str) -> Result<Option<CachedResponse>, Error> {
        self.match_entry(name, method, url).await
    }

    async fn match_any(&self, method: &str, url: &str) -> Result<Option<CachedResponse>, Error> {
        self.match_any_entry(method, url).await
    }
}
