//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Service name override.
pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
/// Listening port override.
pub const ENV_SERVICE_PORT: &str = "SERVICE_PORT";
/// `"true"` turns on the `Secure` cookie attribute; any other value turns it off.
pub const ENV_SECURE_COOKIE_ATTRIBUTE: &str = "SECURE_COOKIE_ATTRIBUTE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file without validating it.
pub fn load_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable if set; passing it in keeps tests
/// independent of the process environment.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup(ENV_SERVICE_NAME) {
        config.service.name = name;
    }

    if let Some(port) = lookup(ENV_SERVICE_PORT) {
        config.service.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_SERVICE_PORT,
            value: port,
        })?;
    }

    if let Some(secure) = lookup(ENV_SECURE_COOKIE_ATTRIBUTE) {
        config.session.secure_cookie = secure == "true";
    }

    Ok(())
}

/// Build the effective configuration: defaults, then the optional file, then
/// the environment. The result is validated.
pub fn load_config<F>(path: Option<&Path>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// [`load_config`] against the process environment.
pub fn load_from_env(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    load_config(path, |var| std::env::var(var).ok())
}
