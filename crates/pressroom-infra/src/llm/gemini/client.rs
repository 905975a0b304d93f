//! GeminiEndpoint -- concrete [`ModelEndpoint`] for the Gemini
//! `streamGenerateContent` API.
//!
//! The API key is wrapped in [`secrecy::SecretString`]. It is only exposed
//! while building the request query string and never appears in logs,
//! `Debug` output or error messages.

use std::time::Duration;

use secrecy::SecretString;

use pressroom_core::llm::provider::{ModelEndpoint, TurnStream};
use pressroom_types::error::ConferenceError;
use pressroom_types::llm::TurnRequest;
use pressroom_types::transcript::Role;

use super::streaming::create_gemini_stream;
use super::types::{GeminiContent, GeminiRequest};

/// Gemini streaming endpoint.
pub struct GeminiEndpoint {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

// No Debug derive: the struct holds the API key.

impl GeminiEndpoint {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create an endpoint for `model`.
    ///
    /// `timeout` bounds connecting and each wait for response bytes; a long
    /// stream that keeps producing bytes is never cut off.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, ConferenceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| ConferenceError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Streaming URL for `model`, without query parameters.
    fn stream_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:streamGenerateContent", self.base_url, model)
    }

    /// Convert a [`TurnRequest`] into the Gemini wire body.
    fn to_gemini_request(request: &TurnRequest) -> Result<GeminiRequest, ConferenceError> {
        let contents = request
            .turns
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::Human => "user",
                    Role::Model => "model",
                    Role::Instruction => {
                        return Err(ConferenceError::InvalidRequest(
                            "instruction context cannot be sent as a conversation turn".to_string(),
                        ));
                    }
                };
                Ok(GeminiContent::text(Some(role), turn.text.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GeminiRequest {
            system_instruction: GeminiContent::text(None, request.system_instruction.clone()),
            contents,
        })
    }
}

impl ModelEndpoint for GeminiEndpoint {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn stream_turn(&self, request: TurnRequest) -> TurnStream {
        let body = match Self::to_gemini_request(&request) {
            Ok(body) => body,
            Err(err) => return Box::pin(futures_util::stream::once(async move { Err(err) })),
        };
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let url = self.stream_url(model);

        tracing::debug!(model = %model, turns = body.contents.len(), "opening Gemini stream");
        create_gemini_stream(&self.client, &url, body, &self.api_key)
    }
}
