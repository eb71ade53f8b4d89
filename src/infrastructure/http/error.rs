//! HTTP Error Handling
//!
//! 对外只暴露两类错误：请求本身有误（400）与其余一切（500）。
//! 具体原因只写日志，不进入响应体。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;
use crate::application::ApplicationError;

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(reason) => {
                tracing::warn!(reason = %reason, "Bad request");
                (StatusCode::BAD_REQUEST, "Bad Request")
            }
            ApiError::Internal(reason) => {
                tracing::error!(reason = %reason, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ConstraintKind, StorageError};
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_hides_reason() {
        let (status, body) = body_of(ApiError::BadRequest("id mismatch".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"message": "Bad Request"}));
    }

    #[tokio::test]
    async fn test_every_application_error_is_internal() {
        let err: ApiError = ApplicationError::RepositoryError(StorageError::Constraint(
            ConstraintKind::Unique,
        ))
        .into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"message": "Internal Server Error"}));
    }
}
