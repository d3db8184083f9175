/*
 * Responsibility
 * - /invites 系 handler
 * - 作成は admin roles のみ。token 生成と有効性判定は services::invites
 * - accept は未認証 (招待された本人はまだアカウントを持っていない)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration as ChronoDuration, Utc};

use crate::api::v1::dto::invites::{
    AcceptInviteRequest, AcceptInviteResponse, InviteDetailsResponse, InviteRequest,
    InviteResponse,
};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::repos::{academy_repo, invite_repo, invite_repo::InviteRow, user_repo,
    user_repo::UserRow};
use crate::services::invites;
use crate::state::AppState;

pub async fn create_invite(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), AppError> {
    if !ctx.role.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate().map_err(AppError::validation)?;

    if !academy_repo::exists_by_number(&state.db, req.academy_number).await? {
        return Err(AppError::not_found(format!(
            "Academy with number {} not found",
            req.academy_number
        )));
    }

    let token = invites::generate_token();
    let email = req.email.trim().to_ascii_lowercase();
    let expires_at = Utc::now() + ChronoDuration::hours(req.expires_in_hours);

    let row = invite_repo::create(
        &state.db,
        &token,
        req.academy_number,
        &email,
        &req.role,
        expires_at,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            invite_url: invites::invite_url(&state.public_base_url, &row.token),
            token: row.token,
            expires_at: row.expires_at,
        }),
    ))
}

pub async fn get_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InviteDetailsResponse>, AppError> {
    let row = load_open_invite(&state, &token).await?;

    Ok(Json(InviteDetailsResponse {
        token: row.token,
        academy_number: row.academy_number,
        email: row.email,
        role: row.role,
        expires_at: row.expires_at,
        created_at: row.created_at,
    }))
}

pub async fn accept_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<AcceptInviteRequest>,
) -> Result<Json<AcceptInviteResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let invite = load_open_invite(&state, &token).await?;

    if !invite.email.eq_ignore_ascii_case(req.email.trim()) {
        return Err(AppError::invalid_invite("Email does not match the invite"));
    }

    let user = get_or_create_user(
        &state,
        &invite.email,
        &invite.role,
        Some(invite.academy_number),
    )
    .await?;

    invite_repo::mark_used(&state.db, invite.id, Utc::now()).await?;

    Ok(Json(AcceptInviteResponse {
        user_number: user.user_number,
        role: user.role,
    }))
}

async fn load_open_invite(state: &AppState, token: &str) -> Result<InviteRow, AppError> {
    let row = invite_repo::find_by_token(&state.db, token)
        .await?
        .ok_or_else(|| AppError::invalid_invite("Invalid invite token"))?;

    invites::ensure_open(&row, Utc::now())?;
    Ok(row)
}

/// Existing users are returned as-is (role/academy untouched); new ones are
/// created with the invite's role and academy and a fresh user number.
async fn get_or_create_user(
    state: &AppState,
    email: &str,
    role: &str,
    academy_number: Option<i64>,
) -> Result<UserRow, AppError> {
    if let Some(user) = user_repo::find_by_email(&state.db, email).await? {
        return Ok(user);
    }

    let user_number = generate_user_number(state).await?;
    let user = user_repo::create(&state.db, user_number, email, role, academy_number).await?;

    Ok(user)
}

/// Epoch-millis based public number; bump until free on the rare collision.
async fn generate_user_number(state: &AppState) -> Result<i64, AppError> {
    let mut candidate = Utc::now().timestamp_millis();
    for _ in 0..5 {
        if !user_repo::exists_by_user_number(&state.db, candidate).await? {
            return Ok(candidate);
        }
        candidate += 1;
    }
    tracing::error!("failed to allocate a unique user number");
    Err(AppError::Internal)
}
