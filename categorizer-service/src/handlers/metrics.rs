use axum::extract::State;
use service_core::error::AppError;

use crate::AppState;

pub async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state.metrics.render()
}
