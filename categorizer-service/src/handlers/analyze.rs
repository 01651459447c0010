use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::dtos::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AnalyzeError;
use crate::services::analyze_statement;
use crate::AppState;

/// `POST /api/analyze`: categorize the transactions of one PDF statement.
#[tracing::instrument(skip_all)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let Json(request) = payload?;
    let input = request.into_input().map_err(|err| {
        tracing::info!("Rejected analyze request with missing fields");
        err
    })?;

    tracing::info!(
        document_len = input.base64_data.len(),
        has_chart = input.chart_of_accounts.is_some(),
        "Analyzing statement"
    );

    let result = analyze_statement(state.provider.as_ref(), &state.metrics, &input).await?;

    Ok(Json(AnalyzeResponse { result }))
}
