//! Current user lookup

pub mod ports;
pub mod service;

pub use service::CurrentUserService;
