// VoiceFlow Engine — crate root
//
// Core of a chat assistant front-end: select an AI backend, issue a single
// completion request, classify failures, and keep per-session append-only
// logs of conversation turns and mood entries. The presentation layer
// (text field, audio upload, widgets) lives in the host and drives this
// crate one action at a time.

pub mod atoms;
pub mod engine;

pub use atoms::constants::{CODE_ANALYSIS_PREFIX, SYSTEM_PROMPT};
pub use atoms::error::{DispatchError, EngineResult};
pub use atoms::traits::{AiProvider, ProviderError};
pub use engine::chat::ChatEngine;
pub use engine::dispatcher::Dispatcher;
pub use engine::providers::{AnyProvider, BackendRegistry, ProviderFactory};
pub use engine::session::SessionState;
pub use engine::types::{
    ConversationTurn, InputLanguage, Mood, MoodEntry, ProviderConfig, ProviderKind, SessionStats,
    UiSettings,
};
