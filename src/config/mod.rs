//! Configuration loading for the assignment pipeline.
//!
//! Configuration is read from the `"playbook"` key of a settings object (or a
//! JSON settings file) and merged with defaults. There is no global instance:
//! callers hand the loaded [`PlaybookConfig`] to an
//! [`Assigner`](crate::environment::Assigner).

pub mod schema;

pub use schema::PlaybookConfig;

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Key under which assignment settings live in a settings object.
pub const SETTINGS_KEY: &str = "playbook";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads configuration from a settings JSON value.
///
/// Settings that fail to deserialize are ignored with a warning and defaults
/// are used instead; a configuration that deserializes but does not validate
/// is an error.
///
/// # Example
///
/// ```
/// use scan_playbook::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "playbook": {
///         "strictLookups": true
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert!(config.strict_lookups);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<PlaybookConfig, ConfigError> {
    let mut config = PlaybookConfig::default();

    if let Some(user_settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<PlaybookConfig>(user_settings.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse playbook settings, using defaults");
            }
        }
    }

    config.validate()?;
    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// Unlike [`load_config`], a file that is not valid JSON is an error.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<PlaybookConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let settings: Value = serde_json::from_str(&content)?;

    tracing::debug!(path = %path.display(), "loaded playbook settings file");
    load_config(Some(settings))
}
