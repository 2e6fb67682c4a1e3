//! Locating, reading and repairing the matchline config file.
//!
//! The file is looked up at `MATCHLINE_CONFIG` when set, otherwise under
//! the platform config directory. A section that fails validation is reset
//! to its defaults on its own; the rest of the file is kept.

use crate::schema::MatchlineConfig;
use crate::validation;
use matchline_common::ConfigError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "MATCHLINE_API_URL";

/// Environment variable naming the config file to use.
pub const CONFIG_PATH_ENV: &str = "MATCHLINE_CONFIG";

/// Read a config file and reset any section that fails validation.
pub fn load_from_path(path: &Path) -> Result<MatchlineConfig, ConfigError> {
    let mut config = read_config_file(path)?;
    let reset = repair_sections(&mut config);
    info!(path = %path.display(), reset_sections = reset, "config loaded");
    Ok(config)
}

/// Load the config at [`config_path`], writing the commented template on
/// first run.
pub fn load_default() -> Result<MatchlineConfig, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        return load_from_path(&path);
    }

    write_template(&path)?;
    Ok(MatchlineConfig::default())
}

/// `MATCHLINE_CONFIG` if set and non-blank, else
/// `<config_dir>/matchline/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok(), dirs::config_dir())
}

pub(crate) fn resolve_config_path(
    from_env: Option<String>,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(explicit) = from_env.filter(|v| !v.trim().is_empty()) {
        debug!(path = %explicit.trim(), "config path taken from {CONFIG_PATH_ENV}");
        return Ok(PathBuf::from(explicit.trim()));
    }
    platform_dir
        .map(|dir| dir.join("matchline").join("config.toml"))
        .ok_or_else(|| {
            ConfigError::ParseError(format!(
                "no platform config directory; set {CONFIG_PATH_ENV}"
            ))
        })
}

/// Write the commented template, never clobbering an existing file.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err("cannot create directory for", e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config template already present");
            return Ok(());
        }
        Err(e) => return Err(io_err("cannot create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_err("cannot write", e))?;

    info!(path = %path.display(), "wrote default config template");
    Ok(())
}

fn read_config_file(path: &Path) -> Result<MatchlineConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("{} is not valid config TOML: {e}", path.display()))
    })
}

/// Reset each invalid section to defaults. Returns how many were reset.
fn repair_sections(config: &mut MatchlineConfig) -> usize {
    let invalid = validation::invalid_sections(config);
    for (section, errors) in &invalid {
        warn!(
            section = section.name(),
            "invalid [{}] section replaced by defaults: {}",
            section.name(),
            errors.join("; ")
        );
        section.reset(config);
    }
    invalid.len()
}

/// Apply environment overrides on top of a loaded config.
///
/// Empty values are ignored.
pub fn apply_env_overrides(config: &mut MatchlineConfig) {
    apply_api_url_override(config, std::env::var(API_URL_ENV).ok());
}

pub(crate) fn apply_api_url_override(config: &mut MatchlineConfig, value: Option<String>) {
    if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
        info!(base_url = %url, "api.base_url overridden from {API_URL_ENV}");
        config.api.base_url = url.trim().to_string();
    }
}

fn default_config_toml() -> String {
    r##"# matchline configuration
# Every value below is the built-in default; uncomment to change it.
# Set MATCHLINE_CONFIG to load a different file.

[api]
# base_url = "http://localhost:8000"   # overridden by MATCHLINE_API_URL
# api_prefix = "/api/v1"
# timeout_secs = 40                    # 1-300, whole request budget
# connect_timeout_secs = 10            # 1-60
# send_credentials = true              # keep cookies issued by the backend

[session]
# track_terminal_status = false        # refuse turns on ids seen closed/expired/completed
# delete_on_exit = true

[logging]
# level = "info"                       # trace, debug, info, warn, error
"##
    .to_string()
}
