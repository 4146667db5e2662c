use crate::config::OpenAIConfig;
use crate::provider::{ModelError, ModelProvider, ModelResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, Choice, FinishReason, MessageRole, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Request body for the OpenAI Responses API
#[derive(Debug, Clone, Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
struct InputMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    usage: Option<ResponsesUsage>,
}

/// Only `message` items carry text; reasoning and tool items are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
struct IncompleteDetails {
    reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsesUsage {
    input_tokens: u32,
    output_tokens: u32,
    total_tokens: u32,
}

pub struct OpenAIProvider {
    client: reqwest::Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> ModelResult<Self> {
        config
            .validate()
            .map_err(|msg| ModelError::InvalidConfig { message: msg })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Unknown {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn convert_message_role(role: &MessageRole) -> String {
        match role {
            MessageRole::System => "system".to_string(),
            MessageRole::User => "user".to_string(),
            MessageRole::Assistant => "assistant".to_string(),
        }
    }

    fn convert_message(msg: &ChatMessage) -> InputMessage {
        InputMessage {
            role: Self::convert_message_role(&msg.role),
            content: msg.content.clone().unwrap_or_default(),
        }
    }

    fn convert_finish_reason(
        status: Option<&str>,
        details: Option<&IncompleteDetails>,
    ) -> Option<FinishReason> {
        match status {
            Some("completed") => Some(FinishReason::Stop),
            Some("incomplete") => match details.and_then(|d| d.reason.as_deref()) {
                Some("content_filter") => Some(FinishReason::ContentFilter),
                _ => Some(FinishReason::Length),
            },
            _ => None,
        }
    }

    /// Concatenates every `output_text` part of every message item.
    fn collect_output_text(output: &[OutputItem]) -> Option<String> {
        let mut text: Option<String> = None;
        for item in output {
            if let OutputItem::Message { content } = item {
                for part in content {
                    if let ContentPart::OutputText { text: chunk } = part {
                        text.get_or_insert_with(String::new).push_str(chunk);
                    }
                }
            }
        }
        text
    }

    fn handle_http_error(err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::ServiceUnavailable {
                message: "Request timeout".to_string(),
            }
        } else if err.is_connect() {
            ModelError::ServiceUnavailable {
                message: "Cannot connect to OpenAI API".to_string(),
            }
        } else {
            ModelError::Network(err)
        }
    }

    fn handle_status_error(status: u16, body: String, model: &str) -> ModelError {
        match status {
            401 | 403 => ModelError::Authentication,
            404 => ModelError::ModelNotFound {
                model: model.to_string(),
            },
            429 => ModelError::RateLimit,
            503 => ModelError::ServiceUnavailable {
                message: "OpenAI API unavailable".to_string(),
            },
            _ => ModelError::Unknown {
                message: format!("OpenAI API error ({}): {}", status, body),
            },
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    async fn chat(&self, request: ChatRequest) -> ModelResult<ChatResponse> {
        debug!("Starting responses request with model: {}", request.model);

        let body = ResponsesRequest {
            model: request.model.clone(),
            input: request.messages.iter().map(Self::convert_message).collect(),
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
        };

        let url = format!("{}/v1/responses", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            warn!("OpenAI API returned status {}", status);
            return Err(Self::handle_status_error(status, error_text, &request.model));
        }

        let parsed: ResponsesResponse = response.json().await.map_err(Self::handle_http_error)?;

        // Reasoning-only output (e.g. cut off by the token cap) is an empty reply.
        let text = Self::collect_output_text(&parsed.output).unwrap_or_default();

        let finish_reason =
            Self::convert_finish_reason(parsed.status.as_deref(), parsed.incomplete_details.as_ref());

        let usage = parsed.usage.map(|u| Usage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.total_tokens,
        });

        info!("Responses request completed ({} chars)", text.len());

        Ok(ChatResponse {
            choices: vec![Choice {
                message: ChatMessage::assistant(text),
                finish_reason,
            }],
            usage,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
