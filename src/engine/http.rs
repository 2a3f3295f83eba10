// ── VoiceFlow Engine: HTTP Retry Utilities ─────────────────────────────────
//
// Shared transport helpers used by both AI providers.
//
// Policy:
//   • Explicit timeouts on every request (10s connect, 60s overall) so a
//     hung upstream never hangs the interface indefinitely.
//   • One bounded retry, on transient failures only (connect/transport
//     errors and 5xx). Credential (401/403) and quota (429) failures are
//     never retried.
//   • Exponential backoff with ±25% jitter; respects `Retry-After`.

use std::time::{Duration, SystemTime};

use reqwest::Client;

// ── Constants ──────────────────────────────────────────────────────────────

/// Maximum number of retry attempts per request.
pub const MAX_RETRIES: u32 = 1;

/// Initial retry delay in milliseconds (doubles each attempt).
const INITIAL_RETRY_DELAY_MS: u64 = 1_000;

/// Maximum retry delay cap in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 30_000;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ── Client factory ─────────────────────────────────────────────────────────

/// Build the engine's HTTP client with explicit timeouts.
pub fn client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

// ── Retryable status detection ─────────────────────────────────────────────

/// Check if an HTTP status code represents a transient error worth one
/// retry. 429 is deliberately excluded: quota failures surface immediately.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500 | 502 | 503 | 504 | 529)
}

// ── Backoff delay ──────────────────────────────────────────────────────────

/// Sleep with exponential backoff + ±25% jitter.
/// Respects Retry-After if the server sent one.
/// Returns the actual delay duration for logging.
pub async fn retry_delay(attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    let base_ms = INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt);
    let capped_ms = base_ms.min(MAX_RETRY_DELAY_MS);
    let delay_ms = if let Some(secs) = retry_after_secs {
        // Use server-specified delay, capped at 60s, floored at our backoff
        (secs.min(60) * 1000).max(capped_ms)
    } else {
        capped_ms
    };
    let delay = Duration::from_millis(apply_jitter(delay_ms));
    tokio::time::sleep(delay).await;
    delay
}

/// Apply ±25% jitter to prevent thundering-herd effects.
fn apply_jitter(base_ms: u64) -> u64 {
    let jitter_range = (base_ms / 4) as i64;
    if jitter_range == 0 {
        return base_ms.max(100);
    }
    let offset = (rand_jitter() % (2 * jitter_range + 1)) - jitter_range;
    let result = base_ms as i64 + offset;
    result.max(100) as u64
}

/// Simple jitter source using system clock nanos (no extra crate needed).
fn rand_jitter() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as i64
}

// ── Retry-After header parsing ─────────────────────────────────────────────

/// Parse Retry-After header value (integer seconds only).
/// HTTP-date format is not implemented and falls back to computed backoff.
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    header_value.trim().parse::<u64>().ok()
}

// ── Error body truncation ──────────────────────────────────────────────────

/// Truncate an error body for logs and messages without splitting a UTF-8
/// character.
pub fn truncate_body(body: &str, max_bytes: usize) -> &str {
    if body.len() <= max_bytes {
        return body;
    }
    let mut end = max_bytes;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_covers_transient_only() {
        for s in [500, 502, 503, 504, 529] {
            assert!(is_retryable_status(s), "{s} should be retryable");
        }
        for s in [400, 401, 403, 404, 429] {
            assert!(!is_retryable_status(s), "{s} must not be retried");
        }
    }

    #[test]
    fn single_bounded_retry() {
        assert_eq!(MAX_RETRIES, 1);
    }

    #[test]
    fn retry_after_parses_integer_seconds_only() {
        assert_eq!(parse_retry_after("30"), Some(30));
        assert_eq!(parse_retry_after("  5 "), Some(5));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_body("short", 200), "short");
        // "héllo" has a two-byte char at index 1..3
        let s = "héllo";
        assert_eq!(truncate_body(s, 2), "h");
        assert_eq!(truncate_body(s, 3), "hé");
    }
}
