// ── VoiceFlow Atoms: Constants ─────────────────────────────────────────────
// All named constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic strings,
// makes auditing easier, and keeps every layer's code self-documenting.

// ── Assistant persona ──────────────────────────────────────────────────────
// Sent with every completion request, regardless of user input. Provider A
// gets it prefixed into the prompt string; Provider B gets it as a separate
// system-role message.
pub const SYSTEM_PROMPT: &str = "\
You are VoiceFlow, a multilingual AI coding assistant.
You help users with:
- Writing code in any programming language
- Explaining code concepts clearly
- Debugging and fixing code issues
- Converting code between languages
- Teaching programming concepts

Always provide:
1. Clear, working code when requested
2. Step-by-step explanations
3. Best practices and tips
4. Error handling when relevant

Format your responses with proper code blocks and clear explanations.";

// ── File analysis ──────────────────────────────────────────────────────────
// Uploaded code is wrapped in this prefix and sent through the normal
// dispatch path. There is no separate code path for file analysis.
pub const CODE_ANALYSIS_PREFIX: &str = "Analyze and explain this code:\n\n";

// ── Generation defaults ────────────────────────────────────────────────────
// Applied when the host constructs a ProviderConfig without overriding them.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

// ── Speech output settings ─────────────────────────────────────────────────
// Speech synthesis itself is a host concern; the engine only validates the
// configured rate. Rates outside this range are clamped, not rejected.
pub const SPEECH_RATE_MIN: f32 = 0.5;
pub const SPEECH_RATE_MAX: f32 = 2.0;

// ── Mood timeline ──────────────────────────────────────────────────────────
// The sidebar widget shows the most recent N mood entries.
pub const MOOD_TIMELINE_LEN: usize = 5;
