// ── VoiceFlow Atoms Layer ──────────────────────────────────────────────────
// Constants, error types, and the provider trait — zero side effects, no I/O.
// Dependency rule: atoms may depend on std, external pure crates, and the
// plain data types in engine::types. Nothing here may perform network or
// filesystem work.

pub mod constants;
pub mod error;
pub mod traits;
