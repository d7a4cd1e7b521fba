//! Groq(OpenAI 호환 chat-completions) provider 어댑터.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::config::Config;
use crate::application::ports::CompletionClient;
use crate::domain::error::{DispatchError, MissingCredentialError};
use crate::domain::review::{CompletionResponse, PromptRequest, TokenUsage};
use crate::infrastructure::config::require_api_key_with;

use super::api_runner::{build_api_client, send_json};

pub struct GroqClient {
    client: Client,
    endpoint: String,
    credential: String,
    timeout: Duration,
}

impl GroqClient {
    /// 자격 증명을 해석해 클라이언트를 만든다. 없으면 즉시 실패한다.
    pub fn from_config<F>(config: &Config, lookup: F) -> Result<Self, MissingCredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = require_api_key_with(config, lookup)?;
        Ok(Self::new(config.api_base(), credential, config.request_timeout()))
    }

    pub fn new(api_base: &str, credential: String, timeout: Duration) -> Self {
        Self {
            client: build_api_client(timeout),
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            credential,
            timeout,
        }
    }
}

/// 요청 엔티티를 chat-completions 본문으로 직렬화한다.
pub fn build_payload(request: &PromptRequest) -> Value {
    let messages: Vec<Value> = request
        .messages
        .iter()
        .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
        .collect();

    json!({
        "model": request.model,
        "messages": messages,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    })
}

/// 첫 번째 choice의 텍스트만 읽는다. 나머지 필드는 사용량 외에는 보지 않는다.
pub fn parse_completion(response: &Value) -> Result<CompletionResponse, DispatchError> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DispatchError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    if content.trim().is_empty() {
        return Err(DispatchError::MalformedResponse(
            "empty response content".to_string(),
        ));
    }

    Ok(CompletionResponse {
        content: content.to_string(),
        usage: TokenUsage {
            prompt_tokens: response
                .pointer("/usage/prompt_tokens")
                .and_then(Value::as_u64),
            completion_tokens: response
                .pointer("/usage/completion_tokens")
                .and_then(Value::as_u64),
            total_tokens: response
                .pointer("/usage/total_tokens")
                .and_then(Value::as_u64),
        }
        .with_derived_total(),
    })
}

#[async_trait]
impl CompletionClient for GroqClient {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(&self, request: &PromptRequest) -> Result<CompletionResponse, DispatchError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "request Groq API");
        let builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.credential)
            .json(&build_payload(request));

        let response = send_json(self.name(), builder, self.timeout).await?;
        parse_completion(&response)
    }
}
