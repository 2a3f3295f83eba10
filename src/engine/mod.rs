// ── VoiceFlow Engine Layer ─────────────────────────────────────────────────
// Everything with behavior: backend dispatch, session state, orchestration.
// Depends on atoms; never the other way around.

pub mod chat;
pub mod dispatcher;
pub mod http;
pub mod providers;
pub mod session;
pub mod types;
