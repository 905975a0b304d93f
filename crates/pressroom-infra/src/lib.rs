//! Infrastructure layer for Pressroom.
//!
//! Contains the implementation of the `ModelEndpoint` port defined in
//! `pressroom-core` (Gemini over server-sent events), plus the adapters the
//! CLI needs before a session starts: config file loading, credential
//! resolution from the environment, and briefing loading.

pub mod briefing;
pub mod config;
pub mod llm;
pub mod secret;
