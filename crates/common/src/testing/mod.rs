//! Testing utilities and helpers
//!
//! - **[`mocks`]**: in-memory [`TokenPersistence`](crate::auth::TokenPersistence)
//!   with failure injection and call counters
//! - **[`tokens`]**: unsigned three-segment tokens with arbitrary payloads
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use roster_common::testing::{make_token, MockTokenPersistence};
//! use roster_common::{Role, TokenStore};
//!
//! let persistence = Arc::new(MockTokenPersistence::new());
//! let store = TokenStore::with_persistence(persistence.clone());
//! store.set(make_token(&serde_json::json!({"role": "admin"})));
//! assert_eq!(store.role(), Some(Role::Admin));
//! assert!(persistence.stored().is_some());
//! ```

pub mod mocks;
pub mod tokens;

pub use mocks::MockTokenPersistence;
pub use tokens::make_token;
