/*!
 * OTP delivery
 *
 * Responsibility:
 * - OtpMailer trait (送信手段の抽象化)
 * - SMTP (lettre) 実装と、開発用の log 実装
 * - メール本文のテンプレート展開
 */
use async_trait::async_trait;
use thiserror::Error;

mod log;
mod smtp;

pub use log::LogMailer;
pub use smtp::SmtpMailer;

const OTP_EMAIL_TEMPLATE: &str = include_str!("../../../templates/otp_email.html");

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mailer configuration error: {0}")]
    Configuration(String),
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error("email delivery failed: {0}")]
    SendFailed(String),
}

/// Delivery seam for one-time codes.
///
/// The OTP service talks to this trait only; whether codes go out via SMTP
/// or into the process log is a deployment decision.
#[async_trait]
pub trait OtpMailer: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn send_otp(&self, to: &str, code: &str, purpose: &str) -> Result<(), MailerError>;
}

pub fn subject_for(purpose: &str) -> String {
    format!("Your verification code ({purpose})")
}

/// Fill the HTML template. Placeholders: {{CODE}}, {{PURPOSE}}.
pub fn render_otp_email(code: &str, purpose: &str) -> String {
    OTP_EMAIL_TEMPLATE
        .replace("{{CODE}}", code)
        .replace("{{PURPOSE}}", purpose)
}

#[cfg(test)]
#[path = "mailer_test.rs"]
mod tests;
