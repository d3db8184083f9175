/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - repo error / validation error / auth error を統一的に変換
 *
 * Error body (API 全体で共通):
 *   { "error": CODE, "message": ..., "path": ..., "correlationId": ... }
 * path と correlationId はリクエスト側の情報なので、IntoResponse では
 * ErrorParts を response extensions に入れるだけにして、
 * middleware::error_context が最終的な body を組み立てる。
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    pub path: String,
    pub correlation_id: String,
}

/// Stashed in response extensions by `IntoResponse`; picked up by
/// `middleware::error_context` which knows the request path/correlation id.
#[derive(Debug, Clone)]
pub struct ErrorParts {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidOtp(String),

    #[error("OTP has already been used")]
    OtpAlreadyUsed,

    #[error("{0}")]
    InvalidInvite(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("User does not have an academy assigned")]
    AcademyNotSet,

    #[error("{0}")]
    AcademyNotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("too many OTP requests, retry later")]
    TooManyRequests,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_invite(message: impl Into<String>) -> Self {
        Self::InvalidInvite(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidOtp(_) => "INVALID_OTP",
            AppError::OtpAlreadyUsed => "CONFLICT",
            AppError::InvalidInvite(_) => "INVALID_INVITE",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AcademyNotSet => "ACADEMY_NOT_SET",
            AppError::AcademyNotFound(_) => "ACADEMY_NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::TooManyRequests => "TOO_MANY_REQUESTS",
            AppError::Internal => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidOtp(_) | AppError::InvalidInvite(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::AcademyNotSet | AppError::AcademyNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::OtpAlreadyUsed | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let parts = ErrorParts {
            code: self.code(),
            message: self.to_string(),
        };

        // Fallback body without request context; error_context middleware
        // rewrites it with path + correlationId when it sees ErrorParts.
        let mut res = (
            self.status(),
            Json(json!({ "error": parts.code, "message": parts.message })),
        )
            .into_response();

        res.extensions_mut().insert(parts);
        res
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict("resource already exists".to_string()),
            RepoError::Db(err) => {
                tracing::error!(error = ?err, "repository error");
                AppError::Internal
            }
        }
    }
}
