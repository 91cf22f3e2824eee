//! Default implementations for configuration types.

use crate::config::color::{Argb, Rgb};
use crate::config::types::{AppearanceConfig, BlurConfig, EmbeddingConfig, RefreshConfig};

/// Corner radius of the widget outline, in logical pixels.
pub const DEFAULT_CORNER_RADIUS: u32 = 20;

/// Translucent black laid over the acrylic backdrop.
pub const DEFAULT_TINT: u32 = 0x9900_0000;

/// Name of the default accent effect.
pub const DEFAULT_EFFECT: &str = "acrylic";

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            corner_radius: DEFAULT_CORNER_RADIUS,
            dot_size: 5,
            dot_gap: 6,
            // 30 looks cramped on small screens
            dots_per_row: 28,
            padding: 30,
            text_height: 58,
            background: Rgb::new(0x1B, 0x1B, 0x1D),
            text: Rgb::new(0xFF, 0xFF, 0xFF),
            label: Rgb::new(0x8C, 0x8C, 0x91),
            done: Rgb::new(0xFF, 0x57, 0x22),
            future: Rgb::new(0xFF, 0xFF, 0xFF),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_delay_ms: 100,
            broadcast_timeout_ms: 1000,
            retry_attempts: 5,
            retry_delay_ms: 200,
        }
    }
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            effect: DEFAULT_EFFECT.to_string(),
            tint: Argb::from_u32(DEFAULT_TINT),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}
