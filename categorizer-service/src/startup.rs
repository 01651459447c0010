use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::{ServerSettings, Settings, UpstreamSettings};
use crate::handlers::{analyze, health_check, metrics};
use crate::middleware::track_metrics;
use crate::services::providers::anthropic::{AnthropicConfig, AnthropicProvider};
use crate::services::Metrics;
use crate::AppState;

fn cors_layer(server: &ServerSettings) -> CorsLayer {
    let allow_origin = match server.cors_origins() {
        None => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| tracing::warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// API routes, health and metrics; every other path is served from the
/// static root, with `/` mapping to `index.html`.
pub fn build_router(state: AppState, server: &ServerSettings) -> Router {
    let static_files = ServeDir::new(&server.static_root);

    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(cors_layer(server))
        .layer(from_fn_with_state(state.metrics.clone(), track_metrics))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// A client that cannot be built is a startup configuration failure.
fn provider_from_settings(upstream: &UpstreamSettings) -> Result<AnthropicProvider, AppError> {
    AnthropicProvider::new(AnthropicConfig {
        base_url: upstream.base_url.clone(),
        timeout: upstream.timeout(),
    })
    .map_err(|e| {
        tracing::error!("Failed to create Messages API client: {}", e);
        AppError::ConfigError(anyhow::Error::new(e).context("Failed to create HTTP client"))
    })
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Wire the Messages API provider and metrics, then bind the listener.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let provider = provider_from_settings(&settings.upstream)?;

        let metrics = Metrics::new().map_err(|e| {
            tracing::error!("Failed to register metrics: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

        let state = AppState::new(Arc::new(provider), Arc::new(metrics));
        Self::build_with_state(&settings, state).await
    }

    /// Bind with a caller-supplied state, e.g. a different provider.
    pub async fn build_with_state(settings: &Settings, state: AppState) -> Result<Self, AppError> {
        let router = build_router(state, &settings.server);

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let local_addr: SocketAddr = listener.local_addr()?;

        tracing::info!(
            address = %local_addr,
            static_root = %settings.server.static_root.display(),
            upstream = %settings.upstream.base_url,
            "Listening"
        );

        Ok(Self {
            port: local_addr.port(),
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
