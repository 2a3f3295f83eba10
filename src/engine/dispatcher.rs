// VoiceFlow Engine — Backend Dispatcher
// Selects a backend, issues a single completion request, and classifies
// failures into the user-facing DispatchError taxonomy.
//
// The dispatcher mutates nothing: on success the caller appends the result
// to its SessionState; on failure no turn is ever recorded.

use log::{info, warn};

use crate::atoms::constants::SYSTEM_PROMPT;
use crate::atoms::error::DispatchError;
use crate::atoms::traits::ProviderError;
use crate::engine::providers::BackendRegistry;
use crate::engine::types::ProviderConfig;

pub struct Dispatcher {
    registry: BackendRegistry,
}

impl Dispatcher {
    pub fn new(registry: BackendRegistry) -> Self {
        Dispatcher { registry }
    }

    /// Dispatcher over the real backends.
    pub fn with_defaults() -> Self {
        Self::new(BackendRegistry::with_defaults())
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Issue one completion request for `prompt` against the configured
    /// backend.
    ///
    /// Preconditions are checked before any network call: a non-empty
    /// prompt, a non-empty API key, and an available backend. The prompt is
    /// transmitted exactly as given; only the emptiness check trims.
    /// An empty completion is a valid success.
    pub async fn dispatch(
        &self,
        prompt: &str,
        config: &ProviderConfig,
    ) -> Result<String, DispatchError> {
        if prompt.trim().is_empty() {
            return Err(DispatchError::EmptyPrompt);
        }
        if config.api_key.is_empty() {
            return Err(DispatchError::MissingCredential);
        }
        let provider = self
            .registry
            .resolve(config)
            .ok_or(DispatchError::BackendUnavailable(config.kind))?;

        info!("[engine] dispatch to {} model={}", provider.kind(), config.model);

        match provider
            .complete(
                SYSTEM_PROMPT,
                prompt,
                &config.model,
                config.max_output_tokens,
                config.temperature,
            )
            .await
        {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("[engine] dispatch to {} failed: {}", config.kind, e);
                Err(classify(e))
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ── Error classification ───────────────────────────────────────────────────

/// Map a provider failure into the user-facing taxonomy.
///
/// Structured HTTP status takes precedence; the substring heuristic on the
/// failure message is the fallback for backends that only surface text.
fn classify(err: ProviderError) -> DispatchError {
    match err {
        ProviderError::Auth(message) => DispatchError::InvalidCredential(message),
        ProviderError::RateLimited { message, .. } => DispatchError::QuotaExceeded(message),
        ProviderError::Api {
            status: 401 | 403,
            message,
        } => DispatchError::InvalidCredential(message),
        ProviderError::Api {
            status: 429,
            message,
        } => DispatchError::QuotaExceeded(message),
        ProviderError::Api { message, .. } | ProviderError::Transport(message) => {
            classify_message(message)
        }
    }
}

/// Best-effort substring classification of a failure message.
fn classify_message(message: String) -> DispatchError {
    let lower = message.to_lowercase();
    if lower.contains("api key") || lower.contains("invalid") {
        DispatchError::InvalidCredential(message)
    } else if lower.contains("quota") {
        DispatchError::QuotaExceeded(message)
    } else {
        DispatchError::Unknown(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_status_beats_message_text() {
        // Body says nothing about keys; the 401 status is decisive.
        let err = ProviderError::Api {
            status: 401,
            message: "permission denied".to_string(),
        };
        assert!(matches!(classify(err), DispatchError::InvalidCredential(_)));
    }

    #[test]
    fn rate_limit_status_beats_message_text() {
        let err = ProviderError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert!(matches!(classify(err), DispatchError::QuotaExceeded(_)));
    }

    #[test]
    fn message_heuristic_detects_credential_problems() {
        for msg in ["invalid api key", "Invalid request", "bad API KEY"] {
            assert!(
                matches!(
                    classify_message(msg.to_string()),
                    DispatchError::InvalidCredential(_)
                ),
                "{msg:?} should classify as InvalidCredential"
            );
        }
    }

    #[test]
    fn message_heuristic_detects_quota_problems() {
        assert!(matches!(
            classify_message("you exceeded your current quota".to_string()),
            DispatchError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn unclassifiable_failures_fall_through_to_unknown() {
        let err = classify_message("connection reset by peer".to_string());
        assert!(matches!(err, DispatchError::Unknown(_)));
        // The rendered message carries the connectivity hint.
        assert!(err.to_string().contains("Check your internet connection"));
    }
}
