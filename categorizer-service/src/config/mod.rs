use serde::Deserialize;
use service_core::config::{configuration_directory, layered_builder};
use service_core::error::AppError;
use service_core::observability::LogFormat;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SERVICE_NAME: &str = "categorizer-service";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address. Loopback unless a deployment opts into `0.0.0.0`.
    pub host: String,
    /// `0` binds an ephemeral port.
    pub port: u16,
    /// Directory the front-end is served from; `/` maps to `index.html`.
    pub static_root: PathBuf,
    /// Comma-separated origins, or `*` for any origin.
    pub cors_allowed_origins: String,
    /// Request body limit. Base64 PDFs easily exceed axum's 2 MiB default.
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            static_root: PathBuf::from("static"),
            cors_allowed_origins: "*".to_string(),
            max_body_bytes: 32 * 1024 * 1024,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` means any origin is allowed.
    pub fn cors_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Messages API origin, without the `/v1/messages` path.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            timeout_secs: 120,
        }
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

/// Load `config/base.yaml` (optional) and `APP_*` overrides. A bare `PORT`
/// variable, as set by most hosting platforms, wins over `server.port`.
pub fn get_configuration() -> Result<Settings, AppError> {
    let settings = layered_builder(SERVICE_NAME)?
        .set_override_option("server.port", std::env::var("PORT").ok())?
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    let base_path = std::env::current_dir()?;
    settings.server.static_root = resolve_static_root(&base_path, &settings.server.static_root);
    Ok(settings)
}

/// A relative static root that does not exist under `base_path` is looked up
/// next to the service's `config/` directory instead, so `cargo run` works
/// from the workspace root as well as from the crate.
pub fn resolve_static_root(base_path: &Path, static_root: &Path) -> PathBuf {
    if static_root.is_absolute() || base_path.join(static_root).exists() {
        return static_root.to_path_buf();
    }

    let service_root = configuration_directory(base_path, SERVICE_NAME);
    match service_root.parent() {
        Some(dir) if dir.join(static_root).exists() => dir.join(static_root),
        _ => static_root.to_path_buf(),
    }
}
