//! Conference configuration types.
//!
//! `ConferenceConfig` represents the optional `config.toml` in the data
//! directory. Every field has a default, so an empty or missing file yields a
//! working configuration for the Gemini streaming endpoint.

use serde::{Deserialize, Serialize};

/// Top-level configuration for a conference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceConfig {
    /// Model identifier appended to the endpoint path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Scheme and host of the streaming endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Connect and read-idle timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Seed human turn that asks the model to start.
    #[serde(default = "default_opening_line")]
    pub opening_line: String,

    /// Marker substring that ends the conference when the model emits it.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Reply (trimmed, case-insensitive) that abandons the conference.
    #[serde(default = "default_quit_keyword")]
    pub quit_keyword: String,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_opening_line() -> String {
    "Begin the press conference.".to_string()
}

fn default_sentinel() -> String {
    "[END OF PRESS CONFERENCE]".to_string()
}

fn default_quit_keyword() -> String {
    "/quit".to_string()
}

impl Default for ConferenceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            opening_line: default_opening_line(),
            sentinel: default_sentinel(),
            quit_keyword: default_quit_keyword(),
        }
    }
}
