pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod prompt;
pub mod services;
pub mod startup;

use services::{Metrics, TextProvider};
use std::sync::Arc;

/// Shared application state: the upstream provider and metrics collectors.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TextProvider>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextProvider>, metrics: Arc<Metrics>) -> Self {
        Self { provider, metrics }
    }
}
