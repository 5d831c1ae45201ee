use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::photo::ApiResponse;
use crate::store::StoreError;

/// Handler-level failures. Every variant renders as `{success: false, message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("File exceeds the {0} byte upload limit")]
    PayloadTooLarge(usize),

    #[error("Failed to save configuration")]
    Persistence,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Persistence | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NoFile | StoreError::NotAllowed | StoreError::InvalidDocument => {
                ApiError::Validation(e.to_string())
            }
            StoreError::NotFound => ApiError::NotFound(e.to_string()),
            StoreError::AlreadyExists(_) => ApiError::Conflict(e.to_string()),
            StoreError::Io(_) | StoreError::Json(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }
        (status, Json(ApiResponse::failed(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::NoFile, StatusCode::BAD_REQUEST),
            (StoreError::NotAllowed, StatusCode::BAD_REQUEST),
            (StoreError::InvalidDocument, StatusCode::BAD_REQUEST),
            (StoreError::NotFound, StatusCode::NOT_FOUND),
            (
                StoreError::AlreadyExists("cat_1.png".into()),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::Io(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (store_err, status) in cases {
            assert_eq!(ApiError::from(store_err).status(), status);
        }
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ApiError::from(StoreError::NotAllowed).to_string(),
            "File type not allowed"
        );
        assert_eq!(
            ApiError::from(StoreError::NoFile).to_string(),
            "No file selected"
        );
        assert_eq!(
            ApiError::Persistence.to_string(),
            "Failed to save configuration"
        );
    }
}
