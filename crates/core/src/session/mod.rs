//! Session gating

pub mod guards;
pub mod ports;
