//! # Roster Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP transport and the request executor (URL joining, query
//!   encoding, bearer and cookie handling, envelope parsing)
//! - The refresh coordinator and the `ApiClient` facade with the
//!   401 → refresh → retry-once protocol
//! - Typed services for the `/auth/*` and `/students` endpoints
//! - Configuration loading and file-backed token/cookie storage
//!
//! ## Architecture
//! - Implements traits defined in `roster-core` and `roster-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod services;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, RefreshCoordinator};
pub use errors::InfraError;
pub use http::{
    Credentials, Exchange, HttpClient, HttpClientBuilder, Query, RequestExecutor, RequestOptions,
};
pub use services::{AuthService, StudentService};
pub use storage::{FileTokenPersistence, PersistentCookieJar};
