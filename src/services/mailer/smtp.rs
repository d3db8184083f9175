use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::SmtpConfig;
use crate::services::mailer::{MailerError, OtpMailer, render_otp_email, subject_for};

/// SMTP mailer (STARTTLS relay) for OTP delivery.
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .map_err(|e| MailerError::Configuration(format!("invalid from address: {e}")))?;

        let creds = Credentials::new(config.user.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailerError::Configuration(format!("failed to create SMTP relay: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self { from, transport })
    }
}

#[async_trait]
impl OtpMailer for SmtpMailer {
    fn backend_name(&self) -> &'static str {
        "smtp"
    }

    async fn send_otp(&self, to: &str, code: &str, purpose: &str) -> Result<(), MailerError> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| MailerError::InvalidRecipient(format!("{e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject_for(purpose))
            .header(ContentType::TEXT_HTML)
            .body(render_otp_email(code, purpose))
            .map_err(|e| MailerError::SendFailed(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(format!("failed to send email: {e}")))?;

        Ok(())
    }
}
