/*
 * Responsibility
 * - OTP auth の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub email: String,
    pub purpose: String,
}

impl OtpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.purpose.trim().is_empty() {
            return Err("purpose is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct OtpVerifyRequest {
    pub email: String,
    pub purpose: String,
    pub otp: String,
}

impl OtpVerifyRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.purpose.trim().is_empty() {
            return Err("purpose is required");
        }
        if self.otp.len() != 6 || !self.otp.chars().all(|c| c.is_ascii_digit()) {
            return Err("otp must be 6 digits");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OtpMessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyResponse {
    pub message: &'static str,
    pub access_token: String,
    /// Kept as a string on the wire (original format).
    pub user_number: String,
}

/// Cheap shape check: non-empty local part and domain around a single '@'.
/// Real validation happens when the mailer tries to deliver.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("email must be valid"),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
