// VoiceFlow Engine — Core types
// These are the data structures that flow through the engine and across the
// host boundary. They are independent of any specific AI provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::atoms::constants::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, SPEECH_RATE_MAX, SPEECH_RATE_MIN,
};

// ── Model / Provider Config ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Provider A: single-shot generate-content call, system and user text
    /// merged into one prompt string.
    Gemini,
    /// Provider B: chat-completion call taking a structured system/user
    /// message pair.
    OpenAi,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Display name for error messages and the provider picker.
    pub fn label(&self) -> &str {
        match self {
            ProviderKind::Gemini => "Google Gemini",
            ProviderKind::OpenAi => "OpenAI GPT",
        }
    }

    /// Models offered in the host's model picker. Any model id is accepted
    /// at dispatch time; these are only suggestions.
    pub fn suggested_models(&self) -> &[&str] {
        match self {
            ProviderKind::Gemini => &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"],
            ProviderKind::OpenAi => &["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo"],
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-call backend configuration, built fresh from the host's current
/// selections for every dispatch. Never cached beyond the single call and
/// never logged (it carries the API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// Override for self-hosted or proxied endpoints. `None` uses the
    /// provider's public base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl ProviderConfig {
    pub fn new(
        kind: ProviderKind,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        ProviderConfig {
            kind,
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// ── Conversation log ───────────────────────────────────────────────────

/// One user-prompt/AI-response pair, recorded after a successful dispatch.
/// Immutable once created; failed dispatches never produce a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_text: String,
    pub ai_text: String,
    pub timestamp: DateTime<Utc>,
    pub provider: ProviderKind,
}

// ── Mood log ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Frustrated,
    Confused,
    Excited,
}

impl Mood {
    /// All moods in picker order.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Frustrated,
        Mood::Confused,
        Mood::Excited,
    ];

    pub fn label(&self) -> &str {
        match self {
            Mood::Happy => "😊 Happy",
            Mood::Neutral => "😐 Neutral",
            Mood::Sad => "😞 Sad",
            Mood::Frustrated => "😡 Frustrated",
            Mood::Confused => "🤔 Confused",
            Mood::Excited => "🎉 Excited",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged mood, appended by an explicit user action independent of the
/// dispatcher. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
}

// ── UI settings ────────────────────────────────────────────────────────

/// Input language selection. Display-only: nothing in the engine enforces
/// or detects the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputLanguage {
    #[default]
    AutoDetect,
    English,
    Spanish,
    French,
    German,
    Hindi,
    Urdu,
    Chinese,
    Japanese,
}

/// Host-side interface settings recognized by the engine. Speech synthesis
/// itself is a named extension point the host provides; the engine only
/// validates the rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    pub input_language: InputLanguage,
    pub enable_speech_output: bool,
    pub speech_rate: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            input_language: InputLanguage::AutoDetect,
            enable_speech_output: false,
            speech_rate: 1.0,
        }
    }
}

impl UiSettings {
    /// Speech rate clamped into the supported range.
    pub fn normalized_speech_rate(&self) -> f32 {
        self.speech_rate.clamp(SPEECH_RATE_MIN, SPEECH_RATE_MAX)
    }
}

// ── Session stats ──────────────────────────────────────────────────────

/// O(1) counters for the host's stats widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_queries: usize,
    pub mood_logs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_generation_constants() {
        let cfg = ProviderConfig::new(ProviderKind::Gemini, "gemini-1.5-flash", "k");
        assert_eq!(cfg.max_output_tokens, 1500);
        assert!((cfg.temperature - 0.7).abs() < f64::EPSILON);
        assert!(cfg.base_url.is_none());
    }

    #[test]
    fn every_kind_suggests_models() {
        for kind in [ProviderKind::Gemini, ProviderKind::OpenAi] {
            assert!(!kind.suggested_models().is_empty());
            assert!(!kind.default_base_url().is_empty());
        }
    }

    #[test]
    fn speech_rate_is_clamped() {
        let mut settings = UiSettings::default();
        settings.speech_rate = 5.0;
        assert_eq!(settings.normalized_speech_rate(), 2.0);
        settings.speech_rate = 0.1;
        assert_eq!(settings.normalized_speech_rate(), 0.5);
        settings.speech_rate = 1.3;
        assert_eq!(settings.normalized_speech_rate(), 1.3);
    }

    #[test]
    fn provider_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::Gemini).unwrap(),
            "\"gemini\""
        );
        assert_eq!(
            serde_json::to_string(&ProviderKind::OpenAi).unwrap(),
            "\"openai\""
        );
    }
}
