/*
 * Responsibility
 * - invite_token テーブル向け SQLx 操作
 * - token 文字列をキーにした lookup と used_at の打刻
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct InviteRow {
    pub id: Uuid,
    pub token: String,
    pub academy_number: i64,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    token: &str,
    academy_number: i64,
    email: &str,
    role: &str,
    expires_at: DateTime<Utc>,
) -> RepoResult<InviteRow> {
    let row = sqlx::query_as::<_, InviteRow>(
        r#"
        INSERT INTO invite_token (id, token, academy_number, email, role, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, token, academy_number, email, role, expires_at, used_at, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(token)
    .bind(academy_number)
    .bind(email)
    .bind(role)
    .bind(expires_at)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn find_by_token(db: &PgPool, token: &str) -> RepoResult<Option<InviteRow>> {
    let row = sqlx::query_as::<_, InviteRow>(
        r#"
        SELECT id, token, academy_number, email, role, expires_at, used_at, created_at
        FROM invite_token
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn mark_used(db: &PgPool, id: Uuid, used_at: DateTime<Utc>) -> RepoResult<u64> {
    let res = sqlx::query(
        r#"
        UPDATE invite_token
        SET used_at = $2
        WHERE id = $1 AND used_at IS NULL
        "#,
    )
    .bind(id)
    .bind(used_at)
    .execute(db)
    .await?;

    Ok(res.rows_affected())
}
