/*
 * Responsibility
 * - user_session テーブル向け SQLx 操作
 * - access token の jti 単位でセッションを記録する
 * - middleware は jti が active (未失効・未期限切れ) かをここで確認する
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub user_id: i64,
    pub jwt_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    user_id: i64,
    jwt_id: Uuid,
    expires_at: DateTime<Utc>,
) -> RepoResult<SessionRow> {
    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        INSERT INTO user_session (id, user_id, jwt_id, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, jwt_id, expires_at, revoked_at, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(jwt_id)
    .bind(expires_at)
    .fetch_one(db)
    .await?;

    Ok(row)
}

/// True when the jti has a session that is neither revoked nor expired.
pub async fn is_active(db: &PgPool, jwt_id: Uuid, now: DateTime<Utc>) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM user_session
            WHERE jwt_id = $1 AND revoked_at IS NULL AND expires_at > $2
        )
        "#,
    )
    .bind(jwt_id)
    .bind(now)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

/// Revoke every active session of a user. Caller decides what now is.
pub async fn revoke_all_for_user(
    db: &PgPool,
    user_id: i64,
    revoked_at: DateTime<Utc>,
) -> RepoResult<u64> {
    let res = sqlx::query(
        r#"
        UPDATE user_session
        SET revoked_at = $2
        WHERE user_id = $1 AND revoked_at IS NULL
        "#,
    )
    .bind(user_id)
    .bind(revoked_at)
    .execute(db)
    .await?;

    Ok(res.rows_affected())
}
