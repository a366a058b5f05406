//! Client code for folio.
//!
//! This crate provides the HTTP fetch client, the offline caching router and
//! the portfolio assistant client shared by the server and CLI.

pub mod assistant;
pub mod fetch;
pub mod router;

pub use assistant::{AssistantClient, AssistantConfig, AssistantError};
pub use fetch::{FetchClient, FetchConfig, Network, NetworkResponse, canonicalize};
pub use router::{
    ActivationReport, ActiveRouter, CacheRouter, Category, Destination, InstalledRouter, Intercept, RequestMode,
    ResponseSource, RouteRequest, Routed, RouterConfig, classify,
};
