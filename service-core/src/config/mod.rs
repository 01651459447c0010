use crate::error::AppError;
use config::{builder::DefaultState, ConfigBuilder, Environment, File};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `APP_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "APP";

/// Locate a service's `config/` directory whether the process runs from the
/// workspace root or from inside the service crate.
pub fn configuration_directory(base_path: &Path, service_name: &str) -> PathBuf {
    if base_path.ends_with(service_name) {
        base_path.join("config")
    } else {
        base_path.join(service_name).join("config")
    }
}

/// Layered configuration: optional `config/base.yaml`, then `APP_` environment
/// variables. Callers may add further sources or overrides before building.
pub fn layered_builder(service_name: &str) -> Result<ConfigBuilder<DefaultState>, AppError> {
    dotenvy::dotenv().ok();

    let base_path = std::env::current_dir()?;
    let configuration_directory = configuration_directory(&base_path, service_name);

    Ok(config::Config::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        ))
}
