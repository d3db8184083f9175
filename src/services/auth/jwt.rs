use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::user_repo::UserRow;
use crate::services::auth::roles::AppRole;

/// Access token (JWT) claims.
///
/// Claim names follow the original wire format (camelCase); `sub` is the
/// internal user id, `userNumber` the public one. `academyNumber` is carried
/// as a string and absent when the user has no academy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    pub jti: String,

    #[serde(rename = "userNumber")]
    pub user_number: i64,
    pub email: String,
    pub role: String,
    #[serde(
        rename = "academyNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub academy_number: Option<String>,
}

/// Result of signing: the handler needs the token, the session store needs
/// jti + expiry.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub jwt_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct JwtIssuer {
    issuer: String,
    audience: String,
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl JwtIssuer {
    /// `private_key_pem` must be an Ed25519 private key in PKCS#8 PEM format.
    pub fn new(
        private_key_pem: &str,
        issuer: String,
        audience: String,
        ttl_seconds: u64,
    ) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(private_key_pem.as_bytes())
            .map_err(|e| {
                warn!(error = %e, "failed to parse access JWT private key PEM (expected Ed25519 PKCS#8 PEM)");
                AppError::Internal
            })?;

        Ok(Self {
            issuer,
            audience,
            ttl_seconds,
            encoding_key,
        })
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Issue an access token for a user row.
    pub fn issue(&self, user: &UserRow) -> Result<IssuedAccessToken, AppError> {
        let jwt_id = Uuid::new_v4();
        let expires_at = Utc::now() + ChronoDuration::seconds(self.ttl_seconds as i64);

        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: user.id.to_string(),
            exp: expires_at.timestamp(),
            jti: jwt_id.to_string(),
            user_number: user.user_number,
            email: user.email.clone(),
            role: user.role.clone(),
            academy_number: user.academy_number.map(|n| n.to_string()),
        };

        let mut header = Header::new(Algorithm::EdDSA);
        header.typ = Some("JWT".to_string());

        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })?;

        Ok(IssuedAccessToken {
            token,
            jwt_id,
            expires_at,
        })
    }
}

impl fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSub,
    InvalidRole,
    InvalidJti,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSub => write!(f, "invalid 'sub' (expected integer user id)"),
            Self::InvalidRole => write!(f, "invalid 'role' claim"),
            Self::InvalidJti => write!(f, "invalid 'jti' (expected UUID)"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// 検証済み・アプリ側で使う型
///
/// - `sub` はプロジェクト規約として整数の user id なので、ここで i64 に昇格させる
/// - `iss/aud/exp` の整合性は `verify_verified` の中 (jsonwebtoken + 追加チェック) で保証される
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: i64,
    pub user_number: i64,
    pub email: String,
    pub role: AppRole,
    pub academy_number: Option<i64>,
    pub jti: Uuid,
}

/// EdDSA (Ed25519) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AppError> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes()).map_err(|e| {
            warn!(error = %e, "failed to parse access JWT public key PEM (expected Ed25519 PEM)");
            AppError::Internal
        })?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify signature + iss/aud/exp and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation, converted into the application type.
    ///
    /// `jsonwebtoken::Validation` already checks:
    /// - signature
    /// - `exp`
    /// - `iss` and `aud` (because we set them)
    ///
    /// This method additionally checks:
    /// - required claims are present *and not empty* (`iss`, `sub`, `exp`)
    /// - `sub` parses as an integer user id, `jti` as a UUID
    /// - `role` is a known role
    ///
    /// This is the entry-point for the bearer middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }

        let user_id: i64 = claims.sub.parse().map_err(|_| AccessJwtError::InvalidSub)?;
        let jti = Uuid::parse_str(&claims.jti).map_err(|_| AccessJwtError::InvalidJti)?;
        let role = AppRole::parse(&claims.role).ok_or(AccessJwtError::InvalidRole)?;

        // Tolerant: a malformed academyNumber claim degrades to "no academy"
        // rather than rejecting the token.
        let academy_number = claims
            .academy_number
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok());

        Ok(VerifiedAccessToken {
            user_id,
            user_number: claims.user_number,
            email: claims.email,
            role,
            academy_number,
            jti,
        })
    }
}

#[cfg(test)]
#[path = "jwt_test.rs"]
mod tests;
