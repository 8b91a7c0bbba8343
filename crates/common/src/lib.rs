//! Shared utilities, configuration, and error handling for Huddle
//!
//! This crate provides common functionality used across the Huddle application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Cryptographic helpers for passwords and session tokens
//! - Request extractors

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use crypto::{
    generate_random_password, generate_session_token, hash_password, hash_session_token,
    verify_password,
};
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
