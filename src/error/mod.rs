//! Error handling
//!
//! Defines error types and handling for the credential store and portal.

pub mod handlers;
pub mod types;

pub use types::*;
