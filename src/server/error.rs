//! Mapping from service errors to HTTP responses

use crate::services::{AuthError, BlobError, ServiceError, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Spam | Self::Validation(_) | Self::InvalidAttachment(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Auth(AuthError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) | Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::InvalidRecord(_)) => StatusCode::BAD_REQUEST,
            Self::Upload(BlobError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
            Self::Upload(BlobError::AlreadyExists(_)) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = match &self {
            Self::Validation(errors) => json!({
                "success": false,
                "error": self.to_string(),
                "errors": errors.errors,
            }),
            _ => json!({ "success": false, "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ValidationErrors;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(ServiceError::Spam.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::from(ValidationErrors::single("name", "required")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(AuthError::MissingCredential).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::from(AuthError::Forbidden("u".to_string())).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::from(StoreError::NotFound {
                table: "press".to_string(),
                id: "x".to_string(),
            })
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::from(BlobError::AlreadyExists("a".to_string())).status_code(),
            StatusCode::CONFLICT
        );
    }
}
