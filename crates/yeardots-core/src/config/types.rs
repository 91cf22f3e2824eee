//! Configuration type definitions for yeardots.
//!
//! These types are serialized/deserialized from the TOML config file.
//!
//! # Example Configuration
//!
//! ```toml
//! [appearance]
//! corner_radius = 20
//! dots_per_row = 28
//! done = "#FF5722"
//!
//! [embedding]
//! retry_attempts = 5
//! retry_delay_ms = 200
//!
//! [blur]
//! effect = "acrylic"
//! tint = "#99000000"
//!
//! [refresh]
//! interval_secs = 60
//! ```

use serde::{Deserialize, Serialize};

use super::color::{Argb, Rgb};

/// Main configuration loaded from the TOML config file.
///
/// Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WidgetConfig {
    /// Size, spacing and colours of the dot grid
    #[serde(default)]
    pub appearance: AppearanceConfig,

    /// Desktop embedding behaviour
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Composition (blur) effect behind the widget
    #[serde(default)]
    pub blur: BlurConfig,

    /// Progress refresh timer
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Widget geometry and palette, in logical (96 DPI) pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Corner radius of the widget's rounded outline.
    pub corner_radius: u32,
    /// Diameter of one day dot.
    pub dot_size: u32,
    /// Space between neighbouring dots.
    pub dot_gap: u32,
    /// Dots per grid row.
    pub dots_per_row: u32,
    /// Inner padding around the grid.
    pub padding: u32,
    /// Height reserved below the grid for the two labels.
    pub text_height: u32,
    pub background: Rgb,
    pub text: Rgb,
    pub label: Rgb,
    pub done: Rgb,
    pub future: Rgb,
}

/// Desktop embedding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Whether to reparent the widget behind the desktop icons at all.
    pub enabled: bool,

    /// Delay after the first show event before embedding starts.
    /// Default: 100ms.
    pub initial_delay_ms: u64,

    /// Timeout for the message that asks the shell to spawn its background
    /// container. Default: 1000ms.
    pub broadcast_timeout_ms: u32,

    /// Maximum embedding attempts while the host container is missing.
    /// Default: 5.
    pub retry_attempts: u32,

    /// Base delay between embedding attempts; doubles after each failure.
    /// Default: 200ms.
    pub retry_delay_ms: u64,
}

/// Composition effect configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlurConfig {
    pub enabled: bool,

    /// Accent effect name.
    /// Options: disabled, gradient, transparent_gradient, blur_behind, acrylic, host_backdrop.
    pub effect: String,

    /// Tint laid over the blurred backdrop, `#AARRGGBB`.
    pub tint: Argb,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between progress recomputations. Default: 60.
    pub interval_secs: u64,
}
