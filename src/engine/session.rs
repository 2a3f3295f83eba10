// VoiceFlow Engine — Session State
// Append-only, in-memory ordered logs of conversation turns and mood
// entries. One instance per user session, explicitly constructed and
// explicitly passed; never a global singleton.
//
// Single-owner by design: the host drives one action at a time per session,
// so there is no internal locking. A host running concurrent sessions gives
// each its own SessionState; stores are never shared across sessions.

use chrono::Utc;

use crate::engine::types::{ConversationTurn, Mood, MoodEntry, ProviderKind, SessionStats};

/// Per-session chat and mood history. Entries are immutable once appended;
/// nothing is deleted or mutated for the session's lifetime. Growth is
/// unbounded, acceptable for short-lived sessions with no persistence.
#[derive(Debug, Default)]
pub struct SessionState {
    turns: Vec<ConversationTurn>,
    moods: Vec<MoodEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed turn at the end of the log, stamped with the
    /// current wall-clock time. Only successful dispatches reach this.
    pub fn append_turn(
        &mut self,
        user_text: impl Into<String>,
        ai_text: impl Into<String>,
        provider: ProviderKind,
    ) {
        self.turns.push(ConversationTurn {
            user_text: user_text.into(),
            ai_text: ai_text.into(),
            timestamp: Utc::now(),
            provider,
        });
    }

    /// Record one mood entry at the end of the log.
    pub fn append_mood(&mut self, mood: Mood) {
        self.moods.push(MoodEntry {
            timestamp: Utc::now(),
            mood,
        });
    }

    /// The last `n` mood entries in original (oldest-first) order, or fewer
    /// if the log is shorter.
    pub fn recent_moods(&self, n: usize) -> &[MoodEntry] {
        let start = self.moods.len().saturating_sub(n);
        &self.moods[start..]
    }

    /// All turns, oldest first (insertion order is display order).
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// All mood entries, oldest first.
    pub fn moods(&self) -> &[MoodEntry] {
        &self.moods
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn mood_count(&self) -> usize {
        self.moods.len()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            total_queries: self.turns.len(),
            mood_logs: self.moods.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_keep_insertion_order() {
        let mut session = SessionState::new();
        session.append_turn("first", "a", ProviderKind::Gemini);
        session.append_turn("second", "b", ProviderKind::OpenAi);
        let turns = session.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].user_text, "first");
        assert_eq!(turns[1].user_text, "second");
        assert_eq!(turns[1].provider, ProviderKind::OpenAi);
    }

    #[test]
    fn recent_moods_returns_all_when_log_is_short() {
        let mut session = SessionState::new();
        for mood in [Mood::Happy, Mood::Sad, Mood::Excited] {
            session.append_mood(mood);
        }
        let recent = session.recent_moods(5);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].mood, Mood::Happy);
        assert_eq!(recent[2].mood, Mood::Excited);
    }

    #[test]
    fn recent_moods_takes_tail_in_oldest_first_order() {
        let mut session = SessionState::new();
        let sequence = [
            Mood::Happy,
            Mood::Neutral,
            Mood::Sad,
            Mood::Frustrated,
            Mood::Confused,
            Mood::Excited,
            Mood::Happy,
        ];
        for mood in sequence {
            session.append_mood(mood);
        }
        // Entries 6 and 7 of 7, oldest first.
        let recent = session.recent_moods(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mood, Mood::Excited);
        assert_eq!(recent[1].mood, Mood::Happy);
    }

    #[test]
    fn recent_moods_on_empty_store_is_empty() {
        let session = SessionState::new();
        assert!(session.recent_moods(5).is_empty());
    }

    #[test]
    fn counts_are_stable_without_appends() {
        let mut session = SessionState::new();
        session.append_turn("q", "a", ProviderKind::Gemini);
        session.append_mood(Mood::Neutral);
        assert_eq!(session.turn_count(), session.turn_count());
        assert_eq!(session.mood_count(), 1);
        let stats = session.stats();
        assert_eq!(stats.total_queries, 1);
        assert_eq!(stats.mood_logs, 1);
    }
}
