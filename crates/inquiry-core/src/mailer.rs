//! Mailer trait and SMTP implementation.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::compose::{Letter, SenderCredentials};
use crate::error::MailError;

/// Async letter delivery.
///
/// The relay endpoint only talks to this trait, so tests can swap in a
/// recording or failing implementation without a live SMTP server.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one letter. Implementations must not retry.
    async fn send(&self, letter: &Letter) -> Result<(), MailError>;
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    StartTls,
    /// Implicit TLS from the first byte (port 465).
    Tls,
    /// No encryption. Local relays and test servers only.
    None,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" | "smtps" => Ok(Self::Tls),
            "none" | "plain" => Ok(Self::None),
            other => Err(format!("unknown SMTP TLS mode '{other}'")),
        }
    }
}

/// SMTP relay connection settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_owned(),
            port: 587,
            tls: TlsMode::StartTls,
            timeout: Duration::from_secs(10),
        }
    }
}

/// SMTP mailer backed by lettre's async transport.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build the transport. No connection is opened until the first send.
    ///
    /// Credentials are attached only when present; without them the relay
    /// endpoint refuses to send before ever reaching this mailer.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Smtp`] if the TLS parameters for `host` cannot be
    /// built.
    pub fn new(config: &SmtpConfig, credentials: Option<&SenderCredentials>) -> Result<Self, MailError> {
        let mut builder = match config.tls {
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::Smtp(e.to_string()))?,
        };

        builder = builder.port(config.port).timeout(Some(config.timeout));

        if let Some(creds) = credentials {
            builder = builder.credentials(Credentials::new(
                creds.username.clone(),
                creds.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

/// Convert a [`Letter`] into a multipart/alternative MIME message.
///
/// An unparseable reply-to address is dropped rather than failing the
/// send; it comes from the customer and is informational only.
///
/// # Errors
///
/// Returns [`MailError::InvalidAddress`] for a bad sender or recipient and
/// [`MailError::Build`] if lettre rejects the message.
pub fn build_message(letter: &Letter) -> Result<Message, MailError> {
    let from = Mailbox::new(
        Some(letter.from_name.clone()),
        letter
            .from_address
            .parse()
            .map_err(|_| MailError::InvalidAddress(letter.from_address.clone()))?,
    );
    let to: Mailbox = letter
        .to
        .parse()
        .map_err(|_| MailError::InvalidAddress(letter.to.clone()))?;

    let mut builder = Message::builder().from(from).to(to).subject(&letter.subject);

    if let Some(reply_to) = &letter.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(_) => tracing::debug!("customer email is not a valid mailbox, omitting reply-to"),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            letter.text.clone(),
            letter.html.clone(),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, letter: &Letter) -> Result<(), MailError> {
        let message = build_message(letter)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}
