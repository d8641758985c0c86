// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::service::ServiceError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Authenticated, but not allowed to touch the resource
    #[error("{0}")]
    Forbidden(String),

    /// No usable identity on the request
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) | ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::Validation(_) => "validation",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Forbidden(msg) => ApiError::Forbidden(msg),
            ServiceError::Validation(e) => ApiError::Validation(e.to_string()),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use test_case::test_case;

    #[test_case(ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND ; "not found")]
    #[test_case(ServiceError::Forbidden("x".into()), StatusCode::UNAUTHORIZED ; "forbidden")]
    #[test_case(ServiceError::Validation(ValidationError::Empty { field: "name" }), StatusCode::BAD_REQUEST ; "validation")]
    #[test_case(ServiceError::Conflict("x".into()), StatusCode::CONFLICT ; "conflict")]
    #[test_case(ServiceError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR ; "storage")]
    fn test_service_error_status(err: ServiceError, expected: StatusCode) {
        assert_eq!(ApiError::from(err).status(), expected);
    }
}
