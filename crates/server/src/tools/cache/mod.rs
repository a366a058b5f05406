//! Cache-related MCP tools.
//!
//! This module provides tools for inspecting and trimming the cache sets.

pub mod get;
pub mod purge;
pub mod sets;

pub use get::{CacheGetParams, get_impl};
pub use purge::{CachePurgeParams, purge_impl};
pub use sets::sets_impl;
