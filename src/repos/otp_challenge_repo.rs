/*
 * Responsibility
 * - otp_challenge テーブル向け SQLx 操作
 * - code そのものは保存しない (SHA-256 hash のみ)
 * - 検証の判定ロジックは services/auth/otp 側 (ここは CRUD のみ)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct OtpChallengeRow {
    pub id: Uuid,
    pub email: String,
    pub purpose: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: i32,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    email: &str,
    purpose: &str,
    code_hash: &str,
    expires_at: DateTime<Utc>,
) -> RepoResult<OtpChallengeRow> {
    let row = sqlx::query_as::<_, OtpChallengeRow>(
        r#"
        INSERT INTO otp_challenge (id, email, purpose, code_hash, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, email, purpose, code_hash, expires_at, attempts, consumed, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(purpose)
    .bind(code_hash)
    .bind(expires_at)
    .fetch_one(db)
    .await?;

    Ok(row)
}

/// Latest challenge for (email, purpose), consumed or not.
///
/// The caller decides what a consumed/expired row means; filtering here would
/// turn "already used" into "not found".
pub async fn find_latest(
    db: &PgPool,
    email: &str,
    purpose: &str,
) -> RepoResult<Option<OtpChallengeRow>> {
    let row = sqlx::query_as::<_, OtpChallengeRow>(
        r#"
        SELECT id, email, purpose, code_hash, expires_at, attempts, consumed, created_at
        FROM otp_challenge
        WHERE email = $1 AND purpose = $2
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(email)
    .bind(purpose)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn increment_attempts(db: &PgPool, id: Uuid) -> RepoResult<u64> {
    let res = sqlx::query(
        r#"
        UPDATE otp_challenge
        SET attempts = attempts + 1
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(res.rows_affected())
}

pub async fn mark_consumed(db: &PgPool, id: Uuid) -> RepoResult<u64> {
    let res = sqlx::query(
        r#"
        UPDATE otp_challenge
        SET consumed = TRUE
        WHERE id = $1 AND consumed = FALSE
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;

    Ok(res.rows_affected())
}
