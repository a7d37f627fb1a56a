use crate::configuration::EmailSettings;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("email transport is not configured")]
    NotConfigured,
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends transactional mail over SMTP. Callers decide whether a failure
/// matters; registration treats it as log-and-continue.
pub struct EmailService {
    settings: EmailSettings,
}

impl EmailService {
    pub fn new(settings: &EmailSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    #[tracing::instrument(name = "Send verification email.", skip(self, token))]
    pub async fn send_verification(&self, recipient: &str, token: &str) -> Result<(), EmailError> {
        if !self.settings.is_configured() {
            return Err(EmailError::NotConfigured);
        }

        let link = format!("{}/verify/{}", self.settings.base_url, token);
        let sender = Mailbox::new(
            Some("Product Catalog".to_string()),
            self.settings.sender.parse()?,
        );

        let message = Message::builder()
            .from(sender)
            .to(recipient.parse::<Mailbox>()?)
            .subject("Confirm your account")
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<p>Thanks for registering! Follow the link below to activate \
                 your account:</p><a href=\"{link}\">{link}</a>"
            ))?;

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.smtp_host)?
                .port(self.settings.smtp_port)
                .credentials(Credentials::new(
                    self.settings.smtp_username.clone(),
                    self.settings.smtp_password.clone(),
                ))
                .build();

        mailer.send(message).await?;
        tracing::info!("Verification email sent to {}", recipient);

        Ok(())
    }
}
