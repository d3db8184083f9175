/*
 * Responsibility
 * - /auth/otp/request, /auth/otp/verify, /auth/logout の handler
 * - DTO validation → OtpService 呼び出し。判定ロジックは service 側
 */
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;

use crate::api::v1::dto::auth::{
    OtpMessageResponse, OtpRequest, OtpVerifyRequest, OtpVerifyResponse,
};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::repos::session_repo;
use crate::state::AppState;

pub async fn request_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpRequest>,
) -> Result<Json<OtpMessageResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let email = req.email.trim().to_ascii_lowercase();
    state.otp.request(&email, req.purpose.trim()).await?;

    Ok(Json(OtpMessageResponse {
        message: "OTP sent successfully",
    }))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<OtpVerifyRequest>,
) -> Result<Json<OtpVerifyResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let correlation_id = correlation_id(&headers);
    let email = req.email.trim().to_ascii_lowercase();

    let outcome = state
        .otp
        .verify(&email, req.purpose.trim(), &req.otp, &correlation_id)
        .await?;

    Ok(Json(OtpVerifyResponse {
        message: "OTP verified successfully",
        access_token: outcome.access_token,
        user_number: outcome.user_number.to_string(),
    }))
}

/// Revoke every active session of the caller. The presented token stops
/// working immediately (the access middleware checks the session store).
pub async fn logout(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<StatusCode, AppError> {
    let revoked = session_repo::revoke_all_for_user(&state.db, ctx.user_id, Utc::now()).await?;
    tracing::info!(user_id = ctx.user_id, revoked, "sessions revoked on logout");

    Ok(StatusCode::NO_CONTENT)
}

// 上流 (SetRequestIdLayer) が常に入れてくるが、直接叩かれた場合にも備える
fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
