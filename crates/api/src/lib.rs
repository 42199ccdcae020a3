//! # Roster App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - The `roster` command-line definition and command handlers
//! - Application context (dependency injection)
//! - Logging setup and the terminal navigator
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires the token store, API client and services together
//! - Maps command outcomes to output and exit codes

pub mod cli;
pub mod commands;
pub mod context;
pub mod navigator;
pub mod output;
pub mod utils;

// Re-export for convenience
pub use cli::Cli;
pub use commands::{run, Outcome};
pub use context::AppContext;
pub use navigator::CliNavigator;
