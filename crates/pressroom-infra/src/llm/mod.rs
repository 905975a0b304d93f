//! Model endpoint implementations.
//!
//! Contains the SSE decoder and the Gemini implementation of the
//! [`ModelEndpoint`](pressroom_core::llm::provider::ModelEndpoint) trait
//! defined in `pressroom-core`, plus a factory that builds the endpoint from
//! a [`ConferenceConfig`].

pub mod gemini;
pub mod sse;

use std::time::Duration;

use secrecy::SecretString;

use pressroom_types::config::ConferenceConfig;
use pressroom_types::error::ConferenceError;

use self::gemini::GeminiEndpoint;

/// Build the endpoint described by `config`, authenticated with `api_key`.
pub fn create_endpoint(
    config: &ConferenceConfig,
    api_key: SecretString,
) -> Result<GeminiEndpoint, ConferenceError> {
    if config.model.trim().is_empty() {
        return Err(ConferenceError::InvalidRequest("model name is empty".to_string()));
    }
    let timeout = Duration::from_secs(config.request_timeout_secs.max(1));
    let endpoint = GeminiEndpoint::new(api_key, config.model.clone(), timeout)?
        .with_base_url(config.base_url.clone());
    Ok(endpoint)
}
