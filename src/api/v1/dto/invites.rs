/*
 * Responsibility
 * - Invites の request/response DTO
 * - role / expiresInHours の形式チェック
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::auth::AppRole;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub academy_number: i64,
    pub email: String,
    pub role: String,
    pub expires_in_hours: i64,
}

impl InviteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        crate::api::v1::dto::auth::validate_email(&self.email)?;
        match AppRole::parse(&self.role) {
            Some(role) if role.is_invitable() => {}
            _ => return Err("role must be one of: ACADEMY_ADMIN, COACH, PLAYER"),
        }
        if self.expires_in_hours <= 0 {
            return Err("expiresInHours must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub token: String,
    pub invite_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteDetailsResponse {
    pub token: String,
    pub academy_number: i64,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptInviteRequest {
    pub email: String,
}

impl AcceptInviteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        crate::api::v1::dto::auth::validate_email(&self.email)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteResponse {
    pub user_number: i64,
    pub role: String,
}

#[cfg(test)]
#[path = "invites_test.rs"]
mod tests;
