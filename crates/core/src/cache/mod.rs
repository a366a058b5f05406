//! SQLite-backed named cache sets.
//!
//! This is the storage the cache router works against: independently named,
//! versioned collections of request to response entries. It supports:
//!
//! - Content-addressed entry keys (SHA-256 over method and URL)
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Whole-set deletion for generation pruning, plus an opt-in LRU trim

pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod sets;
pub mod storage;

pub use crate::Error;

pub use connection::CacheDb;
pub use entries::CachedResponse;
pub use storage::CacheStorage;
