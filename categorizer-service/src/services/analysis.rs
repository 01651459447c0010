//! Statement analysis: prompt rendering, the upstream call and output cleanup.

use crate::error::AnalyzeError;
use crate::prompt::build_categorization_prompt;
use crate::services::metrics::{Metrics, UpstreamOutcome};
use crate::services::providers::{ProviderError, TextProvider};
use secrecy::SecretString;
use serde_json::Value;

/// A validated analyze request.
pub struct AnalyzeInput {
    pub api_key: SecretString,
    pub base64_data: String,
    pub chart_of_accounts: Option<Value>,
}

/// Trim, drop every "```json" and "```" marker wherever it appears, trim again.
pub fn strip_markdown_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn outcome_of(err: &ProviderError) -> UpstreamOutcome {
    match err {
        ProviderError::ApiError { .. } => UpstreamOutcome::UpstreamError,
        ProviderError::NetworkError(_) | ProviderError::InvalidResponse(_) => {
            UpstreamOutcome::Failure
        }
    }
}

/// Run one categorization. Exactly one upstream call, never retried; the
/// model output is returned as an opaque string.
pub async fn analyze_statement(
    provider: &dyn TextProvider,
    metrics: &Metrics,
    input: &AnalyzeInput,
) -> Result<String, AnalyzeError> {
    let prompt = build_categorization_prompt(input.chart_of_accounts.as_ref());

    match provider
        .generate(&input.api_key, &input.base64_data, &prompt)
        .await
    {
        Ok(response) => {
            metrics.record_upstream(UpstreamOutcome::Success);
            let result = strip_markdown_fences(&response.text);
            tracing::debug!(
                raw_len = response.text.len(),
                result_len = result.len(),
                "Model output cleaned"
            );
            Ok(result)
        }
        Err(err) => {
            metrics.record_upstream(outcome_of(&err));
            Err(err.into())
        }
    }
}
