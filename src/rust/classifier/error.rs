use std::fmt;

/// Represents the different types of errors that can occur while serving a prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// A categorical label was not seen at training time, or a code has no label
    EncodingError(String),
    /// A raw input field is missing or cannot be parsed
    ValidationError(String),
    /// The model artifact is structurally invalid
    ModelError(String),
    /// Inference failed or produced output inconsistent with the encoders
    PredictionError(String),
    /// Error occurred while assembling a classifier from its artifacts
    BuildError(String),
}

impl ClassifierError {
    /// True for errors caused by the caller's input rather than by the loaded artifacts
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EncodingError(_) | Self::ValidationError(_))
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}
