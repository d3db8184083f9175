/*
 * Responsibility
 * - GET /me
 * - AuthCtx (検証済み claims) をそのまま DTO に写すだけ。DB は見ない
 */
use axum::Json;

use crate::api::v1::dto::users::MeResponse;
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(MeResponse {
        user_number: ctx.user_number,
        email: ctx.email,
        role: ctx.role,
        academy_number: ctx.academy_number,
    }))
}
