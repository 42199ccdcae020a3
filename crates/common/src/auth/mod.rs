//! Access token lifecycle on the client side
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TokenStore    │  In-memory token + cached role, change notifications
//! └────────┬────────┘
//!          │
//!          ├──► decode_role          (payload claim, no signature check)
//!          │
//!          └──► TokenPersistence     (durable copy, best-effort)
//!                    │
//!                    ├──► KeychainTokenPersistence  (platform keychain)
//!                    └──► file / memory backends    (roster-infra)
//! ```
//!
//! # Module Organization
//!
//! - **[`role`]**: `Role` and the unsigned payload decoder
//! - **[`token_store`]**: `TokenStore`, the single owner of the bearer token
//! - **[`traits`]**: `TokenPersistence` for durable storage backends
//! - **[`types`]**: change notifications and storage errors
//!
//! The decoded role is a UI convenience. Signatures are never verified here;
//! the server enforces authorization on every request.

#[cfg(feature = "platform")]
mod keychain;
pub mod role;
pub mod token_store;
pub mod traits;
pub mod types;

#[cfg(feature = "platform")]
pub use keychain::KeychainTokenPersistence;
pub use role::{decode_role, try_decode_role, Role, RoleDecodeError};
pub use token_store::TokenStore;
pub use traits::TokenPersistence;
pub use types::{AuthChange, TokenStorageError};
