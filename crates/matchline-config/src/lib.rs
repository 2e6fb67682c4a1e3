//! matchline configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ApiConfig, LoggingConfig, MatchlineConfig, SessionConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{API_URL_ENV, CONFIG_PATH_ENV};

use std::path::Path;

use matchline_common::ConfigError;

/// Load config from `MATCHLINE_CONFIG` or the platform default path.
///
/// Writes the template if no file exists, applies environment overrides,
/// and validates the result.
pub fn load_config() -> Result<MatchlineConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit file, applying the same overrides and
/// validation as [`load_config`].
pub fn load_config_from(path: &Path) -> Result<MatchlineConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MatchlineConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
