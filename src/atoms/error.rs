// ── VoiceFlow Atoms: Error Types ───────────────────────────────────────────
// Single canonical error enum for a dispatch attempt, built with `thiserror`.
//
// Design rules:
//   • Every variant is terminal for the single request — nothing here is
//     retried automatically once it reaches the caller.
//   • `Display` messages are written for direct display to the user.
//   • No variant carries secret material (API keys) in its message.
//   • Credential and quota variants are classified from the provider's
//     structured HTTP status when one exists, falling back to a substring
//     heuristic on the failure message (providers do not uniformly expose
//     structured error codes).

use thiserror::Error;

use crate::engine::types::ProviderKind;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The prompt was empty after trimming. No request was attempted.
    #[error("Prompt is empty. Type a request before sending.")]
    EmptyPrompt,

    /// No API key was supplied. No request was attempted.
    #[error("No API key configured. Enter a key for the selected provider.")]
    MissingCredential,

    /// The selected backend is not registered or was marked unavailable at
    /// startup. No request was attempted.
    #[error("{0} backend is not available in this environment.")]
    BackendUnavailable(ProviderKind),

    /// The provider rejected the credential.
    #[error("Invalid API key: {0}. Check that your key is valid and your account has sufficient credits.")]
    InvalidCredential(String),

    /// The provider reported an exhausted quota or rate limit.
    #[error("Quota exceeded: {0}. Check your account usage limits.")]
    QuotaExceeded(String),

    /// Catch-all for failures that match no known category.
    #[error("{0}. Check your internet connection and API key.")]
    Unknown(String),
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All dispatch-path operations return this type.
pub type EngineResult<T> = Result<T, DispatchError>;

// ── Conversion: DispatchError → String ─────────────────────────────────────
// Lets host command boundaries (`Result<T, String>`) convert without
// boilerplate.

impl From<DispatchError> for String {
    fn from(e: DispatchError) -> Self {
        e.to_string()
    }
}
