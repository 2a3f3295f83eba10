// VoiceFlow Engine — OpenAI Chat Provider (Provider B)
// Implements the AiProvider golden trait over the chat-completions endpoint.
// Sends the structured two-message array (system role, user role) with
// Bearer auth; no streaming.

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde_json::{json, Value};

use crate::atoms::traits::{AiProvider, ProviderError};
use crate::engine::http::{
    self, is_retryable_status, parse_retry_after, retry_delay, truncate_body, MAX_RETRIES,
};
use crate::engine::types::{ProviderConfig, ProviderKind};

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| config.kind.default_base_url().to_string());
        OpenAiProvider {
            client: http::client(),
            base_url,
            api_key: config.api_key.clone(),
        }
    }

    /// First choice's message text. `null` content is a valid empty
    /// completion.
    fn extract_text(v: &Value) -> String {
        v["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_output_tokens: u32,
        temperature: f64,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
            "max_tokens": max_output_tokens,
            "temperature": temperature,
        });

        info!("[engine] OpenAI request to {} model={}", url, model);

        let mut last_error: Option<ProviderError> = None;
        let mut retry_after: Option<u64> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1, retry_after.take()).await;
                warn!(
                    "[engine] OpenAI retry {}/{} after {}ms",
                    attempt,
                    MAX_RETRIES,
                    delay.as_millis()
                );
            }

            let response = match self
                .client
                .post(&url)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", self.api_key))
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
                error!("[engine] OpenAI error {}: {}", status, truncate_body(&body_text, 500));

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
    fn extracts_first_choice_text() {
        let v = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "def reverse(s): return s[::-1]"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        assert_eq!(
            OpenAiProvider::extract_text(&v),
            "def reverse(s): return s[::-1]"
        );
    }

    #[test]
    fn null_content_is_empty_completion() {
        let v = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert_eq!(OpenAiProvider::extract_text(&v), "");
        assert_eq!(OpenAiProvider::extract_text(&json!({})), "");
    }
}
