/*
 * Responsibility
 * - academy テーブル向け SQLx 操作
 * - academy_number (公開番号) をキーにした lookup
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct AcademyRow {
    pub id: i64,
    pub academy_number: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    academy_number: i64,
    name: &str,
    logo_url: Option<&str>,
    primary_color: Option<&str>,
) -> RepoResult<AcademyRow> {
    let row = sqlx::query_as::<_, AcademyRow>(
        r#"
        INSERT INTO academy (academy_number, name, logo_url, primary_color)
        VALUES ($1, $2, $3, $4)
        RETURNING id, academy_number, name, logo_url, primary_color, created_at
        "#,
    )
    .bind(academy_number)
    .bind(name)
    .bind(logo_url)
    .bind(primary_color)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn find_by_number(db: &PgPool, academy_number: i64) -> RepoResult<Option<AcademyRow>> {
    let row = sqlx::query_as::<_, AcademyRow>(
        r#"
        SELECT id, academy_number, name, logo_url, primary_color, created_at
        FROM academy
        WHERE academy_number = $1
        "#,
    )
    .bind(academy_number)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn exists_by_number(db: &PgPool, academy_number: i64) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM academy WHERE academy_number = $1)
        "#,
    )
    .bind(academy_number)
    .fetch_one(db)
    .await?;

    Ok(exists)
}
