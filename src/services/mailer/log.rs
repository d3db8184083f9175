use async_trait::async_trait;
use tracing::info;

use crate::services::mailer::{MailerError, OtpMailer};

/// Development mailer: writes the code to the log instead of sending mail.
///
/// Selected automatically when no SMTP settings are configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl OtpMailer for LogMailer {
    fn backend_name(&self) -> &'static str {
        "log"
    }

    async fn send_otp(&self, to: &str, code: &str, purpose: &str) -> Result<(), MailerError> {
        info!(to = %to, purpose = %purpose, code = %code, "OTP (log mailer, not delivered)");
        Ok(())
    }
}
