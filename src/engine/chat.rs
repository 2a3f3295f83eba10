// VoiceFlow Engine — Chat Orchestration
// The per-submission pipeline: dispatch the prompt, and on success append
// exactly one turn to the session. Failed dispatches leave the session
// untouched and surface their error to the host for display.

use crate::atoms::constants::{CODE_ANALYSIS_PREFIX, MOOD_TIMELINE_LEN};
use crate::atoms::error::DispatchError;
use crate::engine::dispatcher::Dispatcher;
use crate::engine::providers::BackendRegistry;
use crate::engine::session::SessionState;
use crate::engine::types::{ConversationTurn, Mood, MoodEntry, ProviderConfig, SessionStats};

/// One user session: a dispatcher plus its own private SessionState.
pub struct ChatEngine {
    dispatcher: Dispatcher,
    session: SessionState,
}

impl ChatEngine {
    pub fn new(registry: BackendRegistry) -> Self {
        ChatEngine {
            dispatcher: Dispatcher::new(registry),
            session: SessionState::new(),
        }
    }

    /// Engine over the real backends.
    pub fn with_defaults() -> Self {
        Self::new(BackendRegistry::with_defaults())
    }

    /// Process one user submission. On success the turn is appended to the
    /// session log and returned; `user_text` is the input exactly as given.
    pub async fn submit(
        &mut self,
        input: &str,
        config: &ProviderConfig,
    ) -> Result<ConversationTurn, DispatchError> {
        let ai_text = self.dispatcher.dispatch(input, config).await?;
        self.session.append_turn(input, ai_text, config.kind);
        // Just appended, so the log is non-empty.
        Ok(self.session.turns()[self.session.turn_count() - 1].clone())
    }

    /// Analyze uploaded code: wrap the content in the fixed analysis
    /// template and feed it through the normal submit path.
    pub async fn analyze_code(
        &mut self,
        source: &str,
        config: &ProviderConfig,
    ) -> Result<ConversationTurn, DispatchError> {
        let prompt = format!("{}{}", CODE_ANALYSIS_PREFIX, source);
        self.submit(&prompt, config).await
    }

    /// Record the user's current mood. Independent of the dispatcher.
    pub fn log_mood(&mut self, mood: Mood) {
        self.session.append_mood(mood);
    }

    /// The most recent mood entries for the sidebar timeline, oldest first.
    pub fn mood_timeline(&self) -> &[MoodEntry] {
        self.session.recent_moods(MOOD_TIMELINE_LEN)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn stats(&self) -> SessionStats {
        self.session.stats()
    }
}

impl Default for ChatEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
