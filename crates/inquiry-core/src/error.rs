//! Error types for `inquiry-core`.
//!
//! Caller mistakes, operator mistakes, and delivery failures are separate
//! types so the HTTP layer can map each to its own status and message.
//! Credentials never appear in any variant.

/// Errors raised while turning a payload into a sendable letter.
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    /// One or more of name, phone, or material type is absent or blank.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// SMTP username or password is not configured on the server.
    #[error("mail relay credentials are not configured")]
    NotConfigured,

    /// A letter template failed to render.
    #[error("failed to render letter: {0}")]
    Render(#[from] askama::Error),
}

/// Errors from building or delivering a letter.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// An address could not be parsed as a mailbox.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The MIME message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP relay rejected the message or could not be reached.
    #[error("SMTP error: {0}")]
    Smtp(String),
}
