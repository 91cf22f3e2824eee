//! # Configuration System
//!
//! TOML configuration for the yeardots widget.
//!
//! ## Configuration Sources
//!
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.yeardots/config.toml`
//! 3. **Explicit file** - `--config <path>` replaces the user config
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.yeardots/config.toml
//! [appearance]
//! done = "#4CAF50"
//!
//! [blur]
//! effect = "blur_behind"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use yeardots_core::config::WidgetConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WidgetConfig::load(None)?;
//!     let request = config.composition_request();
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::Path;
use std::time::Duration;

// Public API exports
pub use color::{Argb, Rgb};
pub use loading::{data_dir, load_config, user_config_path};
pub use types::{AppearanceConfig, BlurConfig, EmbeddingConfig, RefreshConfig, WidgetConfig};
pub use validation::validate_config;

use crate::desktop::{AccentState, CompositionRequest, RetryPolicy};
use crate::errors::ConfigError;

impl WidgetConfig {
    /// Load configuration from an explicit file or the user config.
    ///
    /// See [`loading::load_config`] for details.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        loading::load_config(explicit)
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Build the composition request described by the `[blur]` section.
    ///
    /// A disabled section (or an unknown effect name) yields a disabled accent.
    pub fn composition_request(&self) -> CompositionRequest {
        let effect = if self.blur.enabled {
            AccentState::parse(&self.blur.effect).unwrap_or(AccentState::Disabled)
        } else {
            AccentState::Disabled
        };
        CompositionRequest::new(effect, self.blur.tint)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.embedding.retry_attempts,
            Duration::from_millis(self.embedding.retry_delay_ms),
        )
    }

    pub fn broadcast_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.embedding.broadcast_timeout_ms))
    }

    pub fn initial_embed_delay(&self) -> Duration {
        Duration::from_millis(self.embedding.initial_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_composition_request_is_acrylic() {
        let request = WidgetConfig::default().composition_request();
        assert_eq!(request.effect, AccentState::AcrylicBlurBehind);
        assert_eq!(request.tint.to_u32(), 0x9900_0000);
    }

    #[test]
    fn test_disabled_blur_yields_disabled_accent() {
        let mut config = WidgetConfig::default();
        config.blur.enabled = false;
        assert_eq!(
            config.composition_request().effect,
            AccentState::Disabled
        );
    }

    #[test]
    fn test_durations_follow_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.broadcast_timeout(), Duration::from_millis(1000));
        assert_eq!(config.initial_embed_delay(), Duration::from_millis(100));
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.retry_policy().max_attempts(), 5);
    }
}
