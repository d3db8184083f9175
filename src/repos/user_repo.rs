/*
 * Responsibility
 * - app_user テーブル向け SQLx 操作
 * - PgPool を受け取り lookup/insert を提供
 * - DB エラーは RepoError に変換しやすい形で返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_number: i64,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub academy_number: Option<i64>,
    pub created_at: DateTime<Utc>,
}

pub async fn find_by_email(db: &PgPool, email: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, user_number, email, role, is_active, academy_number, created_at
        FROM app_user
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn exists_by_user_number(db: &PgPool, user_number: i64) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM app_user WHERE user_number = $1)
        "#,
    )
    .bind(user_number)
    .fetch_one(db)
    .await?;

    Ok(exists)
}

pub async fn create(
    db: &PgPool,
    user_number: i64,
    email: &str,
    role: &str,
    academy_number: Option<i64>,
) -> RepoResult<UserRow> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO app_user (user_number, email, role, is_active, academy_number)
        VALUES ($1, $2, $3, TRUE, $4)
        RETURNING id, user_number, email, role, is_active, academy_number, created_at
        "#,
    )
    .bind(user_number)
    .bind(email)
    .bind(role)
    .bind(academy_number)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}
