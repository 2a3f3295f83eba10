// ── VoiceFlow Atoms: Provider Trait ────────────────────────────────────────
// The golden trait every AI backend implements. Callers hold a type-erased
// handle (engine::providers::AnyProvider) and never name a concrete backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::engine::types::ProviderKind;

// ── Provider-level errors ──────────────────────────────────────────────────
// Raw transport/API failures as the provider saw them. The dispatcher maps
// these into the user-facing DispatchError taxonomy.

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the credential (HTTP 401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The provider throttled the request (HTTP 429).
    #[error("rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Any other non-success API response.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response (DNS, TLS, timeout,
    /// malformed body).
    #[error("transport error: {0}")]
    Transport(String),
}

// ── The golden trait ───────────────────────────────────────────────────────

/// A hosted completion backend. One implementation per wire format.
///
/// `complete` issues exactly one logical completion request: the transport
/// layer may retry a transient failure once, but the caller observes a
/// single call that either yields the top completion's text or a
/// classified failure. An empty completion is a valid success.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Short lowercase identifier for logging.
    fn name(&self) -> &str;

    /// The ProviderKind discriminant of this backend.
    fn kind(&self) -> ProviderKind;

    /// Request a single completion for `user_prompt` under `system_prompt`.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<String, ProviderError>;
}
