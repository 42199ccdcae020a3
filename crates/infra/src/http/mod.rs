//! HTTP transport and the single-request executor.

pub mod client;
pub mod executor;
pub mod url;

pub use client::{HttpClient, HttpClientBuilder};
pub use executor::{Credentials, Exchange, RequestExecutor, RequestOptions, RequestSpec};
pub use url::{join_url, Query};
