/*
 * Responsibility
 * - /me の response DTO
 */
use serde::Serialize;

use crate::services::auth::AppRole;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_number: i64,
    pub email: String,
    pub role: AppRole,
    pub academy_number: Option<i64>,
}
