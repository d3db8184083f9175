/*
 * Responsibility
 * - invite token 文字列の生成 (URL-safe, padding なし)
 * - 招待 URL の組み立て
 * - 有効性判定 (未使用・未期限切れ) は pure function としてここに置く
 */
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::error::AppError;
use crate::repos::invite_repo::InviteRow;

const INVITE_TOKEN_BYTES: usize = 60;

/// Random URL-safe invite token (60 bytes -> 80 chars, no padding).
pub fn generate_token() -> String {
    let mut bytes = [0u8; INVITE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Invite URL handed back to the caller (and mailed out by the admin).
pub fn invite_url(public_base_url: &str, token: &str) -> String {
    format!("{}/invite/{}", public_base_url.trim_end_matches('/'), token)
}

/// An invite is usable when it exists, has never been used, and has not
/// expired. Violations map to INVALID_INVITE with the specific reason.
pub fn ensure_open(invite: &InviteRow, now: DateTime<Utc>) -> Result<(), AppError> {
    if invite.used_at.is_some() {
        return Err(AppError::invalid_invite("Invite token has already been used"));
    }
    if invite.expires_at < now {
        return Err(AppError::invalid_invite("Invite token has expired"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "invites_test.rs"]
mod tests;
