//! Upstream model provider abstraction.
//!
//! The analyze path only needs "send a PDF plus instructions, get text back";
//! the trait keeps the HTTP handler independent of the concrete API client.

pub mod anthropic;

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-2xx answer from the upstream API; status and raw body are kept as-is.
    #[error("API Error: {status}")]
    ApiError { status: u16, body: String },

    #[error("{0}")]
    NetworkError(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Result of a provider response.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Text of every text block, concatenated in order.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: u32,

    /// Output tokens generated.
    pub output_tokens: u32,

    /// Upstream stop reason, when reported.
    pub stop_reason: Option<String>,
}

/// A model that reads a base64 PDF together with text instructions.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one document and its instructions, authenticated with the
    /// caller's key. Implementations must not retry.
    async fn generate(
        &self,
        api_key: &SecretString,
        pdf_base64: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError>;
}
