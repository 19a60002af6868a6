use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::classifier::ClassifierError;

/// Error returned by request handlers, rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The model or encoders were never loaded. Status is 500, like every
    /// other prediction failure.
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("Service unavailable: {}", msg);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("Internal error: {}", msg);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("An error occurred: {}", msg))
    }

    /// Invalid client input, deliberately surfaced with status 500
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("Invalid input: {}", msg);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("An error occurred: {}", msg))
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("Not found: {}", msg);
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        if err.is_invalid_input() {
            Self::invalid_input(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            error: &'a str,
        }

        (self.status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_use_server_error_status() {
        let err = ApiError::from(ClassifierError::EncodingError("unseen label 'x'".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("An error occurred: "));
        assert!(err.message().contains("unseen label 'x'"));
    }

    #[test]
    fn test_not_found_keeps_message() {
        let err = ApiError::not_found("Model not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Model not found");
    }
}
