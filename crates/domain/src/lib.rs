//! # Roster Domain
//!
//! Business domain types and models for the student roster client.
//!
//! This crate contains:
//! - The uniform response [`Envelope`] and the payloads carried inside it
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Endpoint paths and domain constants
//!
//! ## Architecture
//! - No dependencies on other roster crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
