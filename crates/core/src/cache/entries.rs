//! Stored response CRUD operations.

use super::connection::CacheDb;
use super::hash::compute_cache_key;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A response held in a cache set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedResponse {
    /// Request method the entry is keyed by.
    pub method: String,
    /// Request URL the entry is keyed by (fragment already stripped).
    pub url: String,
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// RFC 3339 time the entry was written.
    pub stored_at: String,
}

impl CachedResponse {
    pub fn new(
        method: impl Into<String>, url: impl Into<String>, status: u16, headers: Vec<(String, String)>, body: Vec<u8>,
    ) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            status,
            headers,
            body,
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn key(&self) -> String {
        compute_cache_key(&self.method, &self.url)
    }

    /// Case-insensitive header lookup; first value wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn row_to_response(row: &rusqlite::Row<'_>) -> rusqlite::Result<(CachedResponse, String)> {
    let headers_json: String = row.get(3)?;
    Ok((
        CachedResponse {
            method: row.get(0)?,
            url: row.get(1)?,
            status: row.get(2)?,
            headers: Vec::new(),
            body: row.get(4)?,
            stored_at: row.get(5)?,
        },
        headers_json,
    ))
}

fn decode_headers(found: Option<(CachedResponse, String)>) -> Result<Option<CachedResponse>, Error> {
    match found {
        Some((mut response, headers_json)) => {
            response.headers = serde_json::from_str(&headers_json)
                .map_err(|e| Error::InvalidInput(format!("corrupt headers for {}: {e}", response.url)))?;
            Ok(Some(response))
        }
        None => Ok(None),
    }
}

impl CacheDb {
    /// Insert or overwrite an entry, creating the set when needed.
    pub async fn put_entry(&self, cache_name: &str, response: &CachedResponse) -> Result<(), Error> {
        let cache_name = cache_name.to_string();
        let response = response.clone();
        let headers_json = serde_json::to_string(&response.headers)
            .map_err(|e| Error::InvalidInput(format!("unserializable headers: {e}")))?;
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT OR IGNORE INTO cache_sets (name, created_at) VALUES (?1, ?2)",
                    params![&cache_name, chrono::Utc::now().to_rfc3339()],
                )?;
                tx.execute(
                    "INSERT INTO cache_entries (
                        cache_name, key, method, url, status, headers_json, body, stored_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    ON CONFLICT(cache_name, key) DO UPDATE SET
                        method = excluded.method,
                        url = excluded.url,
                        status = excluded.status,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        stored_at = excluded.stored_at",
                    params![
                        &cache_name,
                        response.key(),
                        &response.method,
                        &response.url,
                        response.status,
                        &headers_json,
                        &response.body,
                        &response.stored_at,
                    ],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up an entry in one set.
    pub async fn match_entry(&self, cache_name: &str, method: &str, url: &str) -> Result<Option<CachedResponse>, Error> {
        let cache_name = cache_name.to_string();
        let key = compute_cache_key(method, url);
        let found = self
            .conn
            .call(move |conn| -> Result<Option<(CachedResponse, String)>, Error> {
                let result = conn.query_row(
                    "SELECT method, url, status, headers_json, body, stored_at
                     FROM cache_entries WHERE cache_name = ?1 AND key = ?2",
                    params![cache_name, key],
                    row_to_response,
                );
                match result {
                    Ok(found) => Ok(Some(found)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;
        decode_headers(found)
    }

    /// Look up an entry across every set, oldest set first.
    pub async fn match_any_entry(&self, method: &str, url: &str) -> Result<Option<CachedResponse>, Error> {
        let key = compute_cache_key(method, url);
        let found = self
            .conn
            .call(move |conn| -> Result<Option<(CachedResponse, String)>, Error> {
                let result = conn.query_row(
                    "SELECT e.method, e.url, e.status, e.headers_json, e.body, e.stored_at
                     FROM cache_entries e
                     JOIN cache_sets s ON s.name = e.cache_name
                     WHERE e.key = ?1
                     ORDER BY s.rowid ASC
                     LIMIT 1",
                    params![key],
                    row_to_response,
                );
                match result {
                    Ok(found) => Ok(Some(found)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;
        decode_headers(found)
    }

    /// Delete the oldest entries of one set until at most `max_entries` remain.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_lru_entries(&self, cache_name: &str, max_entries: usize) -> Result<u64, Error> {
        let cache_name = cache_name.to_string();
        let max = i64::try_from(max_entries).unwrap_or(i64::MAX);
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM cache_entries WHERE cache_name = ?1",
                    params![&cache_name],
                    |row| row.get(0),
                )?;
                if count <= max {
                    return Ok(0);
                }

                let to_delete = count - max;
                let deleted = conn.execute(
                    "DELETE FROM cache_entries WHERE cache_name = ?1 AND key IN (
                        SELECT key FROM cache_entries WHERE cache_name = ?1
                        ORDER BY stored_at ASC, rowid ASC LIMIT ?2
                    )",
                    params![&cache_name, to_delete],
                )?;
                Ok(deleted as u64)
            })
            .await
            .map_err(Error::from)
    }
}
