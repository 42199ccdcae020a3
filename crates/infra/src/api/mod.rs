//! Roster API client
//!
//! - [`ApiClient`]: `get`/`post` facade with the 401 → refresh → retry-once
//!   protocol
//! - [`RefreshCoordinator`]: single-flight token refresh shared by every
//!   caller of one client

pub mod client;
pub mod refresh;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use refresh::RefreshCoordinator;
