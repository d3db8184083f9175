/*
 * Responsibility
 * - /academies 系 handler
 * - 作成は admin roles のみ。academy_number (公開番号) はここで採番する
 */
use axum::{Json, extract::State, http::StatusCode};
use rand::Rng;

use crate::api::v1::dto::academies::{AcademyRequest, AcademyResponse};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::repos::{academy_repo, academy_repo::AcademyRow};
use crate::state::AppState;

const NUMBER_ATTEMPTS: usize = 5;

fn row_to_response(row: AcademyRow) -> AcademyResponse {
    AcademyResponse {
        academy_number: row.academy_number,
        name: row.name,
        logo_url: row.logo_url,
        primary_color: row.primary_color,
    }
}

pub async fn create_academy(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<AcademyRequest>,
) -> Result<(StatusCode, Json<AcademyResponse>), AppError> {
    if !ctx.role.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate().map_err(AppError::validation)?;

    let academy_number = generate_academy_number(&state).await?;

    let row = academy_repo::create(
        &state.db,
        academy_number,
        req.name.trim(),
        req.logo_url.as_deref(),
        req.primary_color.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn my_academy(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<AcademyResponse>, AppError> {
    let academy_number = ctx.academy_number.ok_or(AppError::AcademyNotSet)?;

    let row = academy_repo::find_by_number(&state.db, academy_number)
        .await?
        .ok_or_else(|| {
            AppError::AcademyNotFound(format!(
                "Academy with number {academy_number} not found"
            ))
        })?;

    Ok(Json(row_to_response(row)))
}

/// Random 9-digit public number; retry a few times on collision.
async fn generate_academy_number(state: &AppState) -> Result<i64, AppError> {
    for _ in 0..NUMBER_ATTEMPTS {
        let candidate: i64 = rand::rng().random_range(100_000_000..1_000_000_000);
        if !academy_repo::exists_by_number(&state.db, candidate).await? {
            return Ok(candidate);
        }
    }
    tracing::error!("failed to allocate a unique academy number");
    Err(AppError::Internal)
}
