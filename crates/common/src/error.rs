//! Error types shared across MemeMe crates.

/// Top-level error type for MemeMe operations.
#[derive(Debug, thiserror::Error)]
pub enum MemeError {
    #[error("No image selected")]
    ImageMissing,

    #[error("Image picker cancelled")]
    PickerCancelled,

    #[error("Share cancelled or failed: {reason}")]
    ShareCancelledOrFailed { reason: String },

    #[error("Meme index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Cannot {action} while flow is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Image source unavailable: {source_kind}")]
    SourceUnavailable { source_kind: String },

    #[error("Meme store is no longer available")]
    StoreUnavailable,

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MemeError.
pub type MemeResult<T> = Result<T, MemeError>;

impl MemeError {
    pub fn share_failed(reason: impl Into<String>) -> Self {
        Self::ShareCancelledOrFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_transition(state: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition { state, action }
    }

    pub fn source_unavailable(source_kind: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_kind: source_kind.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the flow absorbs this error instead of surfacing it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PickerCancelled | Self::ShareCancelledOrFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = MemeError::IndexOutOfRange { index: 3, count: 2 };
        assert_eq!(err.to_string(), "Meme index 3 out of range (count 2)");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(MemeError::PickerCancelled.is_recoverable());
        assert!(MemeError::share_failed("dismissed").is_recoverable());
        assert!(!MemeError::ImageMissing.is_recoverable());
        assert!(!MemeError::IndexOutOfRange { index: 0, count: 0 }.is_recoverable());
    }
}
