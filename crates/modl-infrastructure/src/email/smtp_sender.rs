// ============================================================================
// modl Infrastructure - SMTP Email Sender
// File: crates/modl-infrastructure/src/email/smtp_sender.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use modl_core::domain::VerificationEmail;
use modl_core::error::DomainError;
use modl_core::notifications::EmailSender;
use modl_shared::config::MailSettings;
use modl_shared::utils::mask_email;

use super::templates::EmailTemplates;
use crate::error::InfrastructureError;

/// Sends mail through an SMTP relay.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    templates: EmailTemplates,
}

impl SmtpEmailSender {
    /// `timeout` bounds each SMTP command; the registration service applies
    /// its own overall limit on top.
    pub fn new(settings: &MailSettings, timeout: Duration) -> Result<Self, InfrastructureError> {
        let from = settings.from_address.parse::<Mailbox>()?;
        let templates = EmailTemplates::new()?;

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.smtp_host)
        };

        let mut builder = builder.port(settings.smtp_port).timeout(Some(timeout));
        if let (Some(username), Some(password)) = (&settings.smtp_username, &settings.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            templates,
        })
    }

    fn build_message(&self, email: &VerificationEmail) -> Result<Message, DomainError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| DomainError::EmailDelivery(format!("invalid recipient: {}", e)))?;

        let rendered = self
            .templates
            .render_verification(email)
            .map_err(|e| DomainError::InternalError(format!("email template: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(rendered.text, rendered.html))
            .map_err(|e| DomainError::InternalError(format!("email build: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &VerificationEmail) -> Result<(), DomainError> {
        let message = self.build_message(email)?;

        self.transport.send(message).await.map_err(|e| {
            error!("SMTP delivery to {} failed: {}", mask_email(&email.to), e);
            DomainError::EmailDelivery(e.to_string())
        })?;

        info!("Verification email sent to {}", mask_email(&email.to));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn settings() -> MailSettings {
        MailSettings {
            smtp_host: "localhost".into(),
            smtp_port: 1025,
            smtp_username: None,
            smtp_password: None,
            starttls: false,
            from_address: "modl <noreply@modl.gg>".into(),
        }
    }

    fn email(to: &str) -> VerificationEmail {
        VerificationEmail::new(
            to,
            "My Server",
            "myserver",
            "http://myserver.modl.gg/verify-email?token=abc123".to_string(),
        )
    }

    #[tokio::test]
    async fn builds_message_with_subject_and_recipient() {
        let sender = SmtpEmailSender::new(&settings(), Duration::from_secs(5)).unwrap();
        let to: String = SafeEmail().fake();

        let message = sender.build_message(&email(&to)).unwrap();
        let recipients: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        assert_eq!(recipients, vec![to]);

        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("Subject: Verify Your Email Address"));
        assert!(raw.contains("From: modl <noreply@modl.gg>"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_a_delivery_error() {
        let sender = SmtpEmailSender::new(&settings(), Duration::from_secs(5)).unwrap();
        let err = sender.build_message(&email("not-an-email")).unwrap_err();
        assert!(matches!(err, DomainError::EmailDelivery(_)));
    }

    #[tokio::test]
    async fn invalid_sender_address_fails_construction() {
        let mut bad = settings();
        bad.from_address = "nobody".into();
        let err = SmtpEmailSender::new(&bad, Duration::from_secs(5)).err();
        assert!(matches!(err, Some(InfrastructureError::Address(_))));
    }
}
