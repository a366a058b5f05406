//! Core types and shared functionality for folio.
//!
//! This crate provides:
//! - Named response caches with a SQLite backend
//! - The progressive reveal engine and its renderer
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod reveal;

pub use cache::{CacheDb, CacheStorage, CachedResponse};
pub use config::{AppConfig, CacheNames, ConfigError};
pub use error::Error;
pub use reveal::{Reveal, RevealPace, Theme};
