/*
 * Responsibility
 * - OTP の発行と検証 (email + purpose 単位のワンタイムコード)
 * - code は保存しない: SHA-256 hash (base64) のみ DB に置く
 * - 検証成功時に access token + session を発行する
 *
 * Flow:
 *   request: throttle → code 生成 → challenge 保存 → mailer で配送
 *   verify:  最新 challenge を取得 → gate 判定 → consume → JWT + session
 */
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::repos::{otp_challenge_repo, otp_challenge_repo::OtpChallengeRow, session_repo, user_repo};
use crate::services::auth::jwt::JwtIssuer;
use crate::services::auth::throttle::ThrottleStore;
use crate::services::mailer::OtpMailer;

const OTP_CODE_LEN: usize = 6;

/// Six decimal digits, uniformly in 100000..=999999 (no leading zero).
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    let code: u32 = rng.random_range(100_000..1_000_000);
    code.to_string()
}

/// SHA-256 of the code, base64-encoded (standard alphabet).
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Outcome of gating a stored challenge against a presented hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeGate {
    Pass,
    Consumed,
    Expired,
    AttemptsExceeded,
    Mismatch,
}

/// Pure decision: check order is consumed → expired → attempts → hash.
pub fn evaluate_challenge(
    challenge: &OtpChallengeRow,
    provided_hash: &str,
    now: DateTime<Utc>,
    max_attempts: i32,
) -> ChallengeGate {
    if challenge.consumed {
        return ChallengeGate::Consumed;
    }
    if challenge.expires_at < now {
        return ChallengeGate::Expired;
    }
    if challenge.attempts >= max_attempts {
        return ChallengeGate::AttemptsExceeded;
    }
    if challenge.code_hash != provided_hash {
        return ChallengeGate::Mismatch;
    }
    ChallengeGate::Pass
}

/// Service-level result of a successful verification.
#[derive(Debug, Clone)]
pub struct OtpVerifyOutcome {
    pub access_token: String,
    pub user_number: i64,
}

pub struct OtpService {
    db: PgPool,
    jwt: JwtIssuer,
    mailer: Arc<dyn OtpMailer>,
    throttle: Option<Arc<dyn ThrottleStore>>,
    ttl_minutes: i64,
    max_attempts: i32,
    cooldown_seconds: u64,
}

impl OtpService {
    pub fn new(
        db: PgPool,
        jwt: JwtIssuer,
        mailer: Arc<dyn OtpMailer>,
        throttle: Option<Arc<dyn ThrottleStore>>,
        ttl_minutes: i64,
        max_attempts: i32,
        cooldown_seconds: u64,
    ) -> Self {
        Self {
            db,
            jwt,
            mailer,
            throttle,
            ttl_minutes,
            max_attempts,
            cooldown_seconds,
        }
    }

    /// Issue a challenge for (email, purpose) and deliver the code.
    ///
    /// User existence is not checked here; it only surfaces at verification.
    pub async fn request(&self, email: &str, purpose: &str) -> Result<(), AppError> {
        if let Some(throttle) = &self.throttle {
            let key = format!("{email}:{purpose}");
            match throttle.try_acquire(&key, self.cooldown_seconds).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(email = %email, purpose = %purpose, "OTP request inside cooldown window");
                    return Err(AppError::TooManyRequests);
                }
                // Fail open: a broken throttle backend must not block logins.
                Err(e) => {
                    warn!(error = %e, "OTP throttle backend failure, allowing request");
                }
            }
        }

        let code = generate_code();
        let code_hash = hash_code(&code);
        let expires_at = Utc::now() + ChronoDuration::minutes(self.ttl_minutes);

        otp_challenge_repo::create(&self.db, email, purpose, &code_hash, expires_at).await?;

        self.mailer
            .send_otp(email, &code, purpose)
            .await
            .map_err(|e| {
                error!(email = %email, purpose = %purpose, error = %e, "failed to deliver OTP");
                AppError::Internal
            })?;

        info!(
            email = %email,
            purpose = %purpose,
            mailer = self.mailer.backend_name(),
            ttl_minutes = self.ttl_minutes,
            "OTP issued"
        );

        Ok(())
    }

    /// Verify a presented code and, on success, issue a token + session.
    pub async fn verify(
        &self,
        email: &str,
        purpose: &str,
        otp: &str,
        correlation_id: &str,
    ) -> Result<OtpVerifyOutcome, AppError> {
        let provided_hash = hash_code(otp);
        info!(
            correlation_id = %correlation_id,
            email = %email,
            purpose = %purpose,
            "OTP verify started"
        );

        let challenge = otp_challenge_repo::find_latest(&self.db, email, purpose)
            .await?
            .ok_or_else(|| {
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "NOT_FOUND", "OTP verify outcome");
                AppError::InvalidOtp("OTP challenge not found for email and purpose".to_string())
            })?;

        let now = Utc::now();
        match evaluate_challenge(&challenge, &provided_hash, now, self.max_attempts) {
            ChallengeGate::Consumed => {
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "USED", "OTP verify outcome");
                return Err(AppError::OtpAlreadyUsed);
            }
            ChallengeGate::Expired => {
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "EXPIRED", "OTP verify outcome");
                return Err(AppError::InvalidOtp("OTP has expired".to_string()));
            }
            ChallengeGate::AttemptsExceeded => {
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "LOCKED", "OTP verify outcome");
                return Err(AppError::InvalidOtp(
                    "Too many invalid attempts for this OTP".to_string(),
                ));
            }
            ChallengeGate::Mismatch => {
                otp_challenge_repo::increment_attempts(&self.db, challenge.id).await?;
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "INVALID", "OTP verify outcome");
                return Err(AppError::InvalidOtp("Invalid OTP code".to_string()));
            }
            ChallengeGate::Pass => {}
        }

        let user = user_repo::find_by_email(&self.db, email)
            .await?
            .ok_or_else(|| {
                warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "NOT_FOUND", "OTP verify outcome");
                AppError::not_found(format!("User not found for email: {email}"))
            })?;

        if !user.is_active {
            warn!(correlation_id = %correlation_id, email = %email, purpose = %purpose, outcome = "INACTIVE", "OTP verify outcome");
            return Err(AppError::Forbidden);
        }

        otp_challenge_repo::mark_consumed(&self.db, challenge.id).await?;

        let issued = self.jwt.issue(&user)?;
        session_repo::create(&self.db, user.id, issued.jwt_id, issued.expires_at)
            .await
            .map_err(|e| {
                error!(correlation_id = %correlation_id, user_id = user.id, error = ?e, "failed to create session");
                AppError::Internal
            })?;

        info!(
            correlation_id = %correlation_id,
            email = %email,
            purpose = %purpose,
            outcome = "SUCCESS",
            "OTP verify outcome"
        );

        Ok(OtpVerifyOutcome {
            access_token: issued.token,
            user_number: user.user_number,
        })
    }
}

#[cfg(test)]
#[path = "otp_test.rs"]
mod tests;
