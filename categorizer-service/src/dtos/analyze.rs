use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::AnalyzeError;
use crate::services::AnalyzeInput;

/// Body of `POST /api/analyze`.
///
/// Deliberately not `Debug`: it carries the caller's API key.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[validate(required, length(min = 1))]
    pub api_key: Option<String>,

    /// Base64-encoded PDF statement. Content is not inspected.
    #[validate(required, length(min = 1))]
    pub base64_data: Option<String>,

    /// Usually a newline-separated list of account names; any JSON is accepted.
    #[serde(default)]
    pub chart_of_accounts: Option<Value>,
}

impl AnalyzeRequest {
    /// Validate required fields and move the key behind a secret wrapper.
    pub fn into_input(self) -> Result<AnalyzeInput, AnalyzeError> {
        self.validate()?;

        match (self.api_key, self.base64_data) {
            (Some(api_key), Some(base64_data)) => Ok(AnalyzeInput {
                api_key: SecretString::new(api_key),
                base64_data,
                chart_of_accounts: self.chart_of_accounts,
            }),
            _ => Err(AnalyzeError::MissingField),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: String,
}
