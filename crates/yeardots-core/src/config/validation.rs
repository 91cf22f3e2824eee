//! Configuration validation logic.
//!
//! Checks values before they reach the layout and the embedding core.

use crate::config::types::WidgetConfig;
use crate::desktop::AccentState;
use crate::errors::ConfigError;

/// Upper bound for the shell broadcast timeout; the call blocks the event loop.
pub const MAX_BROADCAST_TIMEOUT_MS: u32 = 10_000;

/// Upper bound for embedding attempts.
pub const MAX_RETRY_ATTEMPTS: u32 = 20;

/// Upper bound for every appearance length, in logical pixels.
pub const MAX_APPEARANCE_LENGTH: u32 = 1000;

/// A row never needs more dots than a leap year has days.
pub const MAX_DOTS_PER_ROW: u32 = 366;

/// Validate a WidgetConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Dot size and dots per row must be non-zero
/// - Appearance lengths must be at most 1000, dots per row at most 366
/// - Refresh interval must be non-zero
/// - Broadcast timeout must be within 1..=10000 ms
/// - At most 20 embedding attempts
/// - Blur effect must be a known accent effect
///
/// # Errors
///
/// Returns `ConfigError::InvalidEffect` for an unknown effect name and
/// `ConfigError::InvalidConfiguration` for out-of-range values.
pub fn validate_config(config: &WidgetConfig) -> Result<(), ConfigError> {
    let appearance = &config.appearance;
    if appearance.dot_size == 0 {
        return Err(invalid("appearance.dot_size must be greater than 0"));
    }
    if appearance.dots_per_row == 0 {
        return Err(invalid("appearance.dots_per_row must be greater than 0"));
    }
    if appearance.dots_per_row > MAX_DOTS_PER_ROW {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "appearance.dots_per_row must be at most {} (got {})",
                MAX_DOTS_PER_ROW, appearance.dots_per_row
            ),
        });
    }
    for (name, value) in [
        ("dot_size", appearance.dot_size),
        ("dot_gap", appearance.dot_gap),
        ("padding", appearance.padding),
        ("text_height", appearance.text_height),
        ("corner_radius", appearance.corner_radius),
    ] {
        if value > MAX_APPEARANCE_LENGTH {
            return Err(ConfigError::InvalidConfiguration {
                message: format!(
                    "appearance.{} must be at most {} (got {})",
                    name, MAX_APPEARANCE_LENGTH, value
                ),
            });
        }
    }

    if config.refresh.interval_secs == 0 {
        return Err(invalid("refresh.interval_secs must be greater than 0"));
    }

    let timeout = config.embedding.broadcast_timeout_ms;
    if timeout == 0 || timeout > MAX_BROADCAST_TIMEOUT_MS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "embedding.broadcast_timeout_ms must be between 1 and {} (got {})",
                MAX_BROADCAST_TIMEOUT_MS, timeout
            ),
        });
    }

    if config.embedding.retry_attempts > MAX_RETRY_ATTEMPTS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "embedding.retry_attempts must be at most {} (got {})",
                MAX_RETRY_ATTEMPTS, config.embedding.retry_attempts
            ),
        });
    }

    if AccentState::parse(&config.blur.effect).is_none() {
        return Err(ConfigError::InvalidEffect {
            effect: config.blur.effect.clone(),
            supported: AccentState::valid_names().join(", "),
        });
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&WidgetConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_dots_per_row_rejected() {
        let mut config = WidgetConfig::default();
        config.appearance.dots_per_row = 0;

        let result = validate_config(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_appearance_length_bounds() {
        let mut config = WidgetConfig::default();
        config.appearance.dot_size = 200_000_000;
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("dot_size"));

        let mut config = WidgetConfig::default();
        config.appearance.padding = MAX_APPEARANCE_LENGTH + 1;
        assert!(validate_config(&config).is_err());

        let mut config = WidgetConfig::default();
        config.appearance.dots_per_row = MAX_DOTS_PER_ROW + 1;
        assert!(validate_config(&config).is_err());

        let mut config = WidgetConfig::default();
        config.appearance.dot_size = MAX_APPEARANCE_LENGTH;
        config.appearance.dot_gap = MAX_APPEARANCE_LENGTH;
        config.appearance.dots_per_row = MAX_DOTS_PER_ROW;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_broadcast_timeout_bounds() {
        let mut config = WidgetConfig::default();
        config.embedding.broadcast_timeout_ms = 0;
        assert!(validate_config(&config).is_err());

        config.embedding.broadcast_timeout_ms = MAX_BROADCAST_TIMEOUT_MS + 1;
        assert!(validate_config(&config).is_err());

        config.embedding.broadcast_timeout_ms = MAX_BROADCAST_TIMEOUT_MS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_too_many_retries_rejected() {
        let mut config = WidgetConfig::default();
        config.embedding.retry_attempts = MAX_RETRY_ATTEMPTS + 1;
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("retry_attempts"));
    }

    #[test]
    fn test_unknown_effect_lists_supported() {
        let mut config = WidgetConfig::default();
        config.blur.effect = "mica".to_string();

        let error = validate_config(&config).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidEffect { .. }));
        assert!(error.to_string().contains("acrylic"));
    }

    #[test]
    fn test_all_effect_names_valid() {
        for name in AccentState::valid_names() {
            let mut config = WidgetConfig::default();
            config.blur.effect = name.to_string();
            assert!(
                validate_config(&config).is_ok(),
                "Effect '{}' should be valid",
                name
            );
        }
    }
}
