//! Blur-behind composition effect.
//!
//! The accent policy is set through an undocumented window composition
//! attribute whose behaviour changes between OS releases. Treat every call as
//! best effort.

use tracing::{debug, info, warn};

use super::errors::EmbedError;
use crate::config::Argb;
use crate::config::defaults::DEFAULT_TINT;
use crate::shell::{ShellBridge, WindowHandle};

/// Composition attribute id of the accent policy.
pub const WCA_ACCENT_POLICY: u32 = 19;

/// Accent effect kinds understood by the composition attribute.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentState {
    Disabled = 0,
    Gradient = 1,
    TransparentGradient = 2,
    BlurBehind = 3,
    AcrylicBlurBehind = 4,
    HostBackdrop = 5,
}

impl AccentState {
    pub const ALL: [AccentState; 6] = [
        AccentState::Disabled,
        AccentState::Gradient,
        AccentState::TransparentGradient,
        AccentState::BlurBehind,
        AccentState::AcrylicBlurBehind,
        AccentState::HostBackdrop,
    ];

    /// Config-file name of this effect.
    pub fn as_str(self) -> &'static str {
        match self {
            AccentState::Disabled => "disabled",
            AccentState::Gradient => "gradient",
            AccentState::TransparentGradient => "transparent_gradient",
            AccentState::BlurBehind => "blur_behind",
            AccentState::AcrylicBlurBehind => "acrylic",
            AccentState::HostBackdrop => "host_backdrop",
        }
    }

    /// Parse a config-file effect name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|state| state.as_str() == name)
    }

    pub fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|state| state.as_str()).collect()
    }
}

/// Desired composition effect for one window.
///
/// Built fresh from configuration every time it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionRequest {
    pub effect: AccentState,
    pub flags: u32,
    pub tint: Argb,
    pub animation_id: u32,
}

impl CompositionRequest {
    pub fn new(effect: AccentState, tint: Argb) -> Self {
        Self {
            effect,
            flags: 0,
            tint,
            animation_id: 0,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.effect == AccentState::Disabled
    }
}

impl Default for CompositionRequest {
    fn default() -> Self {
        Self::new(AccentState::AcrylicBlurBehind, Argb::from_u32(DEFAULT_TINT))
    }
}

/// What happened to the one blur attempt made for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlurOutcome {
    Applied,
    /// Disabled in configuration; no call was made.
    Disabled,
    Unsupported { message: String },
}

/// Apply `request` to `window`.
///
/// # Errors
///
/// Returns `EmbedError::CompositionUnsupported` if the OS lacks the call or
/// rejects it. Callers log and carry on; nothing is retried.
pub fn apply_blur<B: ShellBridge + ?Sized>(
    bridge: &B,
    window: WindowHandle,
    request: &CompositionRequest,
) -> Result<(), EmbedError> {
    debug!(
        event = "core.desktop.blur_started",
        window = %window,
        effect = request.effect.as_str(),
        tint = %request.tint
    );

    match bridge.set_accent_policy(window, request) {
        Ok(()) => {
            info!(
                event = "core.desktop.blur_applied",
                window = %window,
                effect = request.effect.as_str()
            );
            Ok(())
        }
        Err(e) => {
            warn!(
                event = "core.desktop.blur_unsupported",
                window = %window,
                error = %e,
                message = "Widget will render without blur"
            );
            Err(EmbedError::CompositionUnsupported {
                message: e.to_string(),
            })
        }
    }
}
