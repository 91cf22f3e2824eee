use crate::errors::YeardotsError;

#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    #[error("Failed to save position: {message}")]
    SaveFailed { message: String },

    #[error("Failed to reset position: {message}")]
    ResetFailed { message: String },
}

impl YeardotsError for PositionError {
    fn error_code(&self) -> &'static str {
        match self {
            PositionError::SaveFailed { .. } => "POSITION_SAVE_FAILED",
            PositionError::ResetFailed { .. } => "POSITION_RESET_FAILED",
        }
    }
}
