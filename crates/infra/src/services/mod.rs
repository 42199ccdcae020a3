//! Typed endpoint services.
//!
//! Thin wrappers that pin each backend endpoint to its request and response
//! payloads. All of them go through [`ApiClient`](crate::api::ApiClient), so
//! they share its refresh protocol.

pub mod auth;
pub mod students;

pub use auth::AuthService;
pub use students::StudentService;
