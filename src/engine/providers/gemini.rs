// VoiceFlow Engine — Google Gemini Provider (Provider A)
// Implements the AiProvider golden trait over the generateContent endpoint.
// Gemini takes a single prompt string, so the system prompt is prefixed
// into the user request rather than sent as a separate message.

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde_json::{json, Value};

use crate::atoms::traits::{AiProvider, ProviderError};
use crate::engine::http::{
    self, is_retryable_status, parse_retry_after, retry_delay, truncate_body, MAX_RETRIES,
};
use crate::engine::types::{ProviderConfig, ProviderKind};

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| config.kind.default_base_url().to_string());
        GeminiProvider {
            client: http::client(),
            base_url,
            api_key: config.api_key.clone(),
        }
    }

    /// Gemini has no system role in this call shape; the persona is
    /// prefixed into the single prompt string.
    fn merge_prompt(system_prompt: &str, user_prompt: &str) -> String {
        format!("{}\n\nUser Request: {}", system_prompt, user_prompt)
    }

    /// Text of the top candidate. A missing or empty candidate is a valid
    /// empty completion, not an error.
    fn extract_text(v: &Value) -> String {
        v["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        // Key travels in the query string; never log this URL.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            self.api_key
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": Self::merge_prompt(system_prompt, user_prompt)}]
            }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_output_tokens,
            },
        });

        info!("[engine] Gemini request model={}", model);

        let mut last_error: Option<ProviderError> = None;
        let mut retry_after: Option<u64> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1, retry_after.take()).await;
                warn!(
                    "[engine] Gemini retry {}/{} after {}ms",
                    attempt,
                    MAX_RETRIES,
                    delay.as_millis()
                );
            }

            let response = match self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ProviderError::Transport(format!(
                        "HTTP request failed: {}",
                        e
                    )));
                    continue;
                }
            };

            let status = response.status().as_u16();
            if !response.status().is_success() {
                retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                let body_text = response.text().await.unwrap_or_default();
                let message = format!("API error {}: {}", status, truncate_body(&body_text, 200));
                error!("[engine] Gemini error {}: {}", status, truncate_body(&body_text, 500));

                if status == 401 || status == 403 {
                    return Err(ProviderError::Auth(message));
                }
                if status == 429 {
                    return Err(ProviderError::RateLimited {
                        message,
                        retry_after_secs: retry_after,
                    });
                }
                if is_retryable_status(status) && attempt < MAX_RETRIES {
                    last_error = Some(ProviderError::Api { status, message });
                    continue;
                }
                return Err(ProviderError::Api { status, message });
            }

            let v: Value = response.json().await.map_err(|e| {
                ProviderError::Transport(format!("malformed response body: {}", e))
            })?;
            return Ok(Self::extract_text(&v));
        }

        Err(last_error
            .unwrap_or_else(|| ProviderError::Transport("request failed".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_merging_prefixes_persona() {
        let merged = GeminiProvider::merge_prompt("persona", "reverse a string");
        assert_eq!(merged, "persona\n\nUser Request: reverse a string");
    }

    #[test]
    fn extracts_multi_part_candidate_text() {
        let v = json!({
            "candidates": [{
                "content": {"parts": [{"text": "def reverse(s): "}, {"text": "return s[::-1]"}]}
            }]
        });
        assert_eq!(
            GeminiProvider::extract_text(&v),
            "def reverse(s): return s[::-1]"
        );
    }

    #[test]
    fn missing_candidates_is_empty_completion() {
        assert_eq!(GeminiProvider::extract_text(&json!({})), "");
        let blocked = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert_eq!(GeminiProvider::extract_text(&blocked), "");
    }
}
