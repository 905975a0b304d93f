//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! The per-turn span opened by the conference driver uses the same names as
//! literal field keys; the conference-level span is built here.

use tracing::field::Empty;

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "gemini").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested (e.g., "gemini-2.0-flash").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// Identifier of the whole conversation (the session id).
pub const GEN_AI_CONVERSATION_ID: &str = "gen_ai.conversation.id";

/// How the conference ended ("concluded", "cancelled", "failed").
pub const PRESSROOM_OUTCOME: &str = "pressroom.outcome";

/// Standard chat operation.
pub const OP_CHAT: &str = "chat";

/// Span covering one whole conference. Model turn spans nest inside it.
pub fn conference_span(provider: &str, model: &str, conversation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "conference",
        gen_ai.operation.name = OP_CHAT,
        gen_ai.provider.name = provider,
        gen_ai.request.model = model,
        gen_ai.conversation.id = conversation_id,
        pressroom.outcome = Empty,
    )
}

/// Record how the conference ended on its span.
pub fn record_outcome(span: &tracing::Span, outcome: &str) {
    span.record(PRESSROOM_OUTCOME, outcome);
}
