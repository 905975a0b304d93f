//! Credential resolution.
//!
//! The API key is read from the process environment once, before a session
//! starts, and handed around as a [`secrecy::SecretString`] from then on.

pub mod env;

pub use env::{resolve_api_key, resolve_with};
