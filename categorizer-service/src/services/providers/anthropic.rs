//! Anthropic Messages API provider.
//!
//! Sends the statement as a base64 `document` block followed by the
//! instructions as a `text` block, in a single user message.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Messages endpoint, relative to the configured base URL.
pub const MESSAGES_PATH: &str = "/v1/messages";

/// Protocol version sent in `anthropic-version`.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Model used for every categorization request.
pub const MODEL: &str = "claude-sonnet-4-20250514";

/// Output token budget for every categorization request.
pub const MAX_TOKENS: u32 = 4000;

const API_KEY_HEADER: &str = "x-api-key";
const VERSION_HEADER: &str = "anthropic-version";
const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Anthropic provider configuration.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Messages API client. Holds no credentials; every call carries the caller's key.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Fails only if the HTTP client cannot be constructed (TLS backend setup).
    pub fn new(config: AnthropicConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), MESSAGES_PATH)
    }
}

/// Build the request body: one user message, document part first.
pub fn build_messages_request<'a>(pdf_base64: &'a str, prompt: &'a str) -> MessagesRequest<'a> {
    MessagesRequest {
        model: MODEL,
        max_tokens: MAX_TOKENS,
        messages: vec![Message {
            role: "user",
            content: vec![
                ContentPart::Document {
                    source: DocumentSource::Base64 {
                        media_type: PDF_MEDIA_TYPE,
                        data: pdf_base64,
                    },
                },
                ContentPart::Text { text: prompt },
            ],
        }],
    }
}

/// Concatenate the text of every `text` block, in order, with no separator.
pub fn collect_text(blocks: &[ResponseBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(text.as_str()),
            ResponseBlock::Other => None,
        })
        .collect()
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    async fn generate(
        &self,
        api_key: &SecretString,
        pdf_base64: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = build_messages_request(pdf_base64, prompt);
        let url = self.messages_url();

        tracing::debug!(
            model = MODEL,
            document_len = pdf_base64.len(),
            prompt_len = prompt.len(),
            "Sending request to Messages API"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .header(VERSION_HEADER, ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Messages API request failed");
                ProviderError::NetworkError(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                elapsed_ms,
                "Messages API returned an error"
            );
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let usage = api_response.usage.unwrap_or_default();

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms,
            blocks = api_response.content.len(),
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            stop_reason = api_response.stop_reason.as_deref().unwrap_or("-"),
            "Messages API call completed"
        );

        Ok(ProviderResponse {
            text: collect_text(&api_response.content),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            stop_reason: api_response.stop_reason,
        })
    }
}

// ============================================================================
// Messages API Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct MessagesRequest<'a> {
    model: &'static str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Document { source: DocumentSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DocumentSource<'a> {
    Base64 {
        media_type: &'static str,
        data: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// One block of a Messages API response. Only text blocks carry output.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}
