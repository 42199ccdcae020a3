//! # Roster Core
//!
//! Pure session logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for navigation and profile lookup
//! - Route guards deciding whether a view may render
//! - The current-user service
//!
//! ## Architecture Principles
//! - Only depends on `roster-common` and `roster-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod session;
pub mod user;

// Re-export specific items to avoid ambiguity
pub use session::guards::{login_location, require_auth, require_role, sanitize_next, Access};
pub use session::ports::SessionNavigator;
pub use user::ports::ProfileSource;
pub use user::CurrentUserService;
