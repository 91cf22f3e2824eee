//! Configuration loading.
//!
//! Resolution order:
//! 1. **Explicit path** - `--config <path>`; the file must exist
//! 2. **User config** - `~/.yeardots/config.toml`; a missing file is not an error
//! 3. **Hardcoded defaults** - Built-in fallback values

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::WidgetConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Name of the per-user data directory under the home directory.
pub const DATA_DIR_NAME: &str = ".yeardots";

/// Base directory for yeardots data (`~/.yeardots`).
///
/// Falls back to `./.yeardots` if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DATA_DIR_NAME),
        None => PathBuf::from(".").join(DATA_DIR_NAME),
    }
}

/// Location of the user config file.
pub fn user_config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Load and validate the configuration.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit path does not exist, a parse error
/// for malformed TOML, or a validation error. A missing user config file
/// yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<WidgetConfig, ConfigError> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match load_config_file(&user_config_path()) {
            Ok(config) => config,
            Err(ConfigError::ConfigNotFound { path }) => {
                debug!(event = "core.config.user_config_missing", path = %path);
                WidgetConfig::default()
            }
            Err(e) => return Err(e),
        },
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load a configuration file from the given path without validating it.
pub fn load_config_file(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config: WidgetConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    debug!(event = "core.config.loaded", path = %path.display());
    Ok(config)
}
