/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, JWT 鍵, OTP/SMTP 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// SMTP settings for OTP delivery.
///
/// Built only when `SMTP_HOST` is set; without it the service falls back to
/// the log-only mailer (development).
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Absolute base used when rendering links we hand out (invite URLs).
    pub public_base_url: String,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,

    // Service signs and verifies its own access tokens (Ed25519 PEM pair).
    pub access_jwt_private_key_pem: String,
    pub access_jwt_public_key_pem: String,

    pub otp_ttl_minutes: i64,
    pub otp_max_attempts: i32,
    pub otp_request_cooldown_seconds: u64,

    pub valkey_url: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let access_token_ttl_seconds = std::env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let access_jwt_private_key_pem = std::env::var("ACCESS_JWT_PRIVATE_KEY_PEM")
            .map_err(|_| ConfigError::Missing("ACCESS_JWT_PRIVATE_KEY_PEM"))?
            .replace("\\n", "\n");

        let access_jwt_public_key_pem = std::env::var("ACCESS_JWT_PUBLIC_KEY_PEM")
            .map_err(|_| ConfigError::Missing("ACCESS_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let otp_ttl_minutes = std::env::var("OTP_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(10);

        let otp_max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(5);

        let otp_request_cooldown_seconds = std::env::var("OTP_REQUEST_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let valkey_url = std::env::var("VALKEY_URL").ok().filter(|s| !s.is_empty());

        let smtp = match std::env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()) {
            Some(host) => {
                let port = std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse::<u16>().ok())
                    .unwrap_or(587);
                let user =
                    std::env::var("SMTP_USER").map_err(|_| ConfigError::Missing("SMTP_USER"))?;
                let password = std::env::var("SMTP_PASSWORD")
                    .map_err(|_| ConfigError::Missing("SMTP_PASSWORD"))?;
                let from_email = std::env::var("SMTP_FROM_EMAIL")
                    .map_err(|_| ConfigError::Missing("SMTP_FROM_EMAIL"))?;
                let from_name = std::env::var("SMTP_FROM_NAME")
                    .unwrap_or_else(|_| "Sport Performance Analysis".to_string());

                Some(SmtpConfig {
                    host,
                    port,
                    user,
                    password,
                    from_email,
                    from_name,
                })
            }
            None => None,
        };

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            public_base_url,
            auth_issuer,
            auth_audience,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            access_jwt_private_key_pem,
            access_jwt_public_key_pem,
            otp_ttl_minutes,
            otp_max_attempts,
            otp_request_cooldown_seconds,
            valkey_url,
            smtp,
        })
    }
}
