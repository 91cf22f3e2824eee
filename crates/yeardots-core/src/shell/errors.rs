use crate::errors::YeardotsError;
use crate::shell::types::WindowHandle;

/// Failures reported by a [`ShellBridge`](super::ShellBridge) implementation.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Window {handle} does not exist")]
    InvalidHandle { handle: WindowHandle },

    #[error("Message 0x{message:04X} to {target} failed or timed out after {timeout_ms}ms")]
    MessageTimedOut {
        target: WindowHandle,
        message: u32,
        timeout_ms: u32,
    },

    #[error("Failed to enumerate top-level windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Failed to reparent {child} under {parent}: {message}")]
    ReparentFailed {
        child: WindowHandle,
        parent: WindowHandle,
        message: String,
    },

    #[error("Failed to show window {handle}: {message}")]
    ShowFailed { handle: WindowHandle, message: String },

    #[error("Composition attributes are not available on this system: {message}")]
    CompositionUnavailable { message: String },

    #[error("Composition attribute rejected for {handle}")]
    CompositionRejected { handle: WindowHandle },

    #[error("Failed to apply window region to {handle}: {message}")]
    RegionRejected { handle: WindowHandle, message: String },
}

impl YeardotsError for ShellError {
    fn error_code(&self) -> &'static str {
        match self {
            ShellError::InvalidHandle { .. } => "SHELL_INVALID_HANDLE",
            ShellError::MessageTimedOut { .. } => "SHELL_MESSAGE_TIMED_OUT",
            ShellError::EnumerationFailed { .. } => "SHELL_ENUMERATION_FAILED",
            ShellError::ReparentFailed { .. } => "SHELL_REPARENT_FAILED",
            ShellError::ShowFailed { .. } => "SHELL_SHOW_FAILED",
            ShellError::CompositionUnavailable { .. } => "SHELL_COMPOSITION_UNAVAILABLE",
            ShellError::CompositionRejected { .. } => "SHELL_COMPOSITION_REJECTED",
            ShellError::RegionRejected { .. } => "SHELL_REGION_REJECTED",
        }
    }
}
