use crate::errors::YeardotsError;
use crate::shell::WindowHandle;

/// Ways desktop embedding can fall short.
///
/// Everything except `HandleNotRealized` leaves the widget working as an
/// ordinary top-level window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("Desktop host container not found after {attempts} attempt(s)")]
    HostContainerNotFound { attempts: u32 },

    #[error("Blur composition unsupported: {message}")]
    CompositionUnsupported { message: String },

    #[error("Failed to reparent widget into the desktop host container: {message}")]
    ReparentFailed { message: String },

    #[error("Window {handle} is not realized yet")]
    HandleNotRealized { handle: WindowHandle },
}

impl EmbedError {
    /// Whether the widget can keep running in a degraded mode.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EmbedError::HandleNotRealized { .. })
    }
}

impl YeardotsError for EmbedError {
    fn error_code(&self) -> &'static str {
        match self {
            EmbedError::HostContainerNotFound { .. } => "HOST_CONTAINER_NOT_FOUND",
            EmbedError::CompositionUnsupported { .. } => "COMPOSITION_UNSUPPORTED",
            EmbedError::ReparentFailed { .. } => "REPARENT_FAILED",
            EmbedError::HandleNotRealized { .. } => "HANDLE_NOT_REALIZED",
        }
    }
}
