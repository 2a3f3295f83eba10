// VoiceFlow Engine — AI Provider Registry
// AnyProvider wraps Box<dyn AiProvider> so callers never name a concrete
// backend. BackendRegistry maps each ProviderKind to an availability flag
// and a factory, resolved once at initialization instead of re-checked at
// every call site.

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use std::collections::HashMap;

use crate::atoms::traits::{AiProvider, ProviderError};
use crate::engine::types::{ProviderConfig, ProviderKind};

// ── Provider factory ───────────────────────────────────────────────────────

/// Builds a concrete backend from a per-call config.
pub type ProviderFactory = Box<dyn Fn(&ProviderConfig) -> Box<dyn AiProvider> + Send + Sync>;

/// Type-erased AI provider. Callers hold `AnyProvider` and call
/// `.complete()` without knowing which concrete backend is in use.
pub struct AnyProvider(Box<dyn AiProvider>);

impl AnyProvider {
    /// Request a single completion from the underlying backend.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        self.0
            .complete(system_prompt, user_prompt, model, max_output_tokens, temperature)
            .await
    }

    /// The ProviderKind discriminant of the underlying provider.
    pub fn kind(&self) -> ProviderKind {
        self.0.kind()
    }
}

// ── Capability registry ────────────────────────────────────────────────────

struct BackendEntry {
    available: bool,
    factory: ProviderFactory,
}

/// Map from provider identifier to availability and factory.
///
/// A backend can be registered but unavailable (its client capability is
/// missing in the running environment); the dispatcher then rejects the
/// request before any network call. Hosts and tests can re-register a kind
/// to swap in an alternative implementation.
pub struct BackendRegistry {
    entries: HashMap<ProviderKind, BackendEntry>,
}

impl BackendRegistry {
    /// A registry with no backends. Everything resolves as unavailable
    /// until registered.
    pub fn empty() -> Self {
        BackendRegistry {
            entries: HashMap::new(),
        }
    }

    /// Both real backends, available.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            ProviderKind::Gemini,
            true,
            Box::new(|config| Box::new(GeminiProvider::new(config))),
        );
        registry.register(
            ProviderKind::OpenAi,
            true,
            Box::new(|config| Box::new(OpenAiProvider::new(config))),
        );
        registry
    }

    /// Register (or replace) the backend for `kind`.
    pub fn register(&mut self, kind: ProviderKind, available: bool, factory: ProviderFactory) {
        self.entries.insert(kind, BackendEntry { available, factory });
    }

    /// Mark an already-registered backend available or unavailable.
    pub fn set_available(&mut self, kind: ProviderKind, available: bool) {
        if let Some(entry) = self.entries.get_mut(&kind) {
            entry.available = available;
        }
    }

    pub fn is_available(&self, kind: ProviderKind) -> bool {
        self.entries
            .get(&kind)
            .map(|entry| entry.available)
            .unwrap_or(false)
    }

    /// Construct the backend for `config.kind`, or `None` if it is not
    /// registered or not available.
    pub fn resolve(&self, config: &ProviderConfig) -> Option<AnyProvider> {
        let entry = self.entries.get(&config.kind)?;
        if !entry.available {
            return None;
        }
        Some(AnyProvider((entry.factory)(config)))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_both_backends() {
        let registry = BackendRegistry::with_defaults();
        assert!(registry.is_available(ProviderKind::Gemini));
        assert!(registry.is_available(ProviderKind::OpenAi));
    }

    #[test]
    fn unregistered_kind_is_unavailable() {
        let registry = BackendRegistry::empty();
        assert!(!registry.is_available(ProviderKind::Gemini));
        let config = ProviderConfig::new(ProviderKind::Gemini, "gemini-pro", "k");
        assert!(registry.resolve(&config).is_none());
    }

    #[test]
    fn availability_flag_blocks_resolution() {
        let mut registry = BackendRegistry::with_defaults();
        registry.set_available(ProviderKind::OpenAi, false);
        let config = ProviderConfig::new(ProviderKind::OpenAi, "gpt-4", "k");
        assert!(registry.resolve(&config).is_none());
        registry.set_available(ProviderKind::OpenAi, true);
        assert!(registry.resolve(&config).is_some());
    }
}
