//! Turns a validated inquiry into the letter sent to the site owner.
//!
//! [`compose`] is pure: it reads the mail settings, checks that sender
//! credentials exist, and renders the plain-text and HTML bodies. Delivery
//! is left to a [`crate::mailer::Mailer`].

use std::fmt;

use askama::Template;

use crate::error::InquiryError;
use crate::inquiry::ValidInquiry;

/// Subject line of every inquiry letter.
pub const SUBJECT: &str = "New Material Inquiry from Website";

/// Display name used for the sender when none is configured.
pub const DEFAULT_SENDER_NAME: &str = "Shiv Shankar Website";

/// Placeholder rendered for optional fields the customer left out.
const NOT_PROVIDED: &str = "N/A";

/// SMTP login for the relay account. The username doubles as the sender
/// address.
#[derive(Clone, PartialEq, Eq)]
pub struct SenderCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SenderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SenderCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Where inquiries go and who they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Owner inbox. Falls back to the sender address when unset.
    pub owner_email: Option<String>,
    /// Relay account credentials; `None` when the server is not configured.
    pub sender: Option<SenderCredentials>,
    /// Display name on the `From` header.
    pub sender_name: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            owner_email: None,
            sender: None,
            sender_name: DEFAULT_SENDER_NAME.to_owned(),
        }
    }
}

impl MailSettings {
    /// Build settings from the raw configuration values, treating blank
    /// strings as unset. Credentials are only present when both halves are.
    #[must_use]
    pub fn new(
        owner_email: Option<String>,
        username: Option<String>,
        password: Option<String>,
        sender_name: Option<String>,
    ) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let sender = match (present(username), present(password)) {
            (Some(username), Some(password)) => Some(SenderCredentials { username, password }),
            _ => None,
        };
        Self {
            owner_email: present(owner_email),
            sender,
            sender_name: present(sender_name).unwrap_or_else(|| DEFAULT_SENDER_NAME.to_owned()),
        }
    }

    /// Whether a send can be attempted at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }
}

/// A fully rendered letter, ready for a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Render the owner-facing letter for an inquiry.
///
/// # Errors
///
/// Returns [`InquiryError::NotConfigured`] when the settings carry no sender
/// credentials, and [`InquiryError::Render`] if a body template fails.
/// Address syntax is checked by the mailer at send time.
pub fn compose(inquiry: &ValidInquiry, settings: &MailSettings) -> Result<Letter, InquiryError> {
    let sender = settings.sender.as_ref().ok_or(InquiryError::NotConfigured)?;

    let to = settings
        .owner_email
        .clone()
        .unwrap_or_else(|| sender.username.clone());

    Ok(Letter {
        from_name: settings.sender_name.clone(),
        from_address: sender.username.clone(),
        to,
        reply_to: inquiry.email.clone(),
        subject: SUBJECT.to_owned(),
        text: render_text(inquiry)?,
        html: render_html(inquiry)?,
    })
}

/// Plain-text body. Values are written verbatim.
#[derive(Template)]
#[template(path = "inquiry.txt", escape = "none")]
struct TextLetter<'a> {
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    material_type: &'a str,
    quantity: &'a str,
    details: &'a str,
}

/// HTML body. Every value is escaped by the template; the details are
/// split into lines joined with `<br>`.
#[derive(Template)]
#[template(path = "inquiry.html")]
struct HtmlLetter<'a> {
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    material_type: &'a str,
    quantity: &'a str,
    detail_lines: Vec<&'a str>,
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_PROVIDED)
}

fn render_text(inquiry: &ValidInquiry) -> askama::Result<String> {
    TextLetter {
        name: &inquiry.name,
        phone: &inquiry.phone,
        email: or_na(inquiry.email.as_deref()),
        material_type: &inquiry.material_type,
        quantity: or_na(inquiry.quantity.as_deref()),
        details: or_na(inquiry.additional_details.as_deref()),
    }
    .render()
}

fn render_html(inquiry: &ValidInquiry) -> askama::Result<String> {
    HtmlLetter {
        name: &inquiry.name,
        phone: &inquiry.phone,
        email: or_na(inquiry.email.as_deref()),
        material_type: &inquiry.material_type,
        quantity: or_na(inquiry.quantity.as_deref()),
        detail_lines: or_na(inquiry.additional_details.as_deref()).lines().collect(),
    }
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn settings() -> MailSettings {
        MailSettings::new(
            Some("owner@example.com".to_owned()),
            Some("relay@example.com".to_owned()),
            Some("app-password".to_owned()),
            None,
        )
    }

    fn inquiry() -> ValidInquiry {
        ValidInquiry {
            name: "Asha".to_owned(),
            phone: "9876543210".to_owned(),
            email: None,
            material_type: "Cement".to_owned(),
            quantity: None,
            additional_details: None,
        }
    }

    #[test]
    fn missing_credentials_is_not_configured() {
        let result = compose(&inquiry(), &MailSettings::default());
        assert!(matches!(result, Err(InquiryError::NotConfigured)));
    }

    #[test]
    fn password_without_username_is_not_configured() {
        let s = MailSettings::new(None, Some("  ".to_owned()), Some("pw".to_owned()), None);
        assert!(!s.is_configured());
    }

    #[test]
    fn letter_is_addressed_from_sender_to_owner() {
        let letter = compose(&inquiry(), &settings()).unwrap();
        assert_eq!(letter.from_name, DEFAULT_SENDER_NAME);
        assert_eq!(letter.from_address, "relay@example.com");
        assert_eq!(letter.to, "owner@example.com");
        assert_eq!(letter.subject, SUBJECT);
        assert_eq!(letter.reply_to, None);
    }

    #[test]
    fn owner_defaults_to_sender_address() {
        let s = MailSettings::new(
            None,
            Some("relay@example.com".to_owned()),
            Some("pw".to_owned()),
            Some("Depot".to_owned()),
        );
        let letter = compose(&inquiry(), &s).unwrap();
        assert_eq!(letter.to, "relay@example.com");
        assert_eq!(letter.from_name, "Depot");
    }

    #[test]
    fn optional_fields_render_as_na() {
        let letter = compose(&inquiry(), &settings()).unwrap();
        assert!(letter.text.contains("Email: N/A\n"));
        assert!(letter.text.contains("Quantity: N/A\n"));
        assert!(letter.text.contains("Additional Details: N/A"));
        assert!(letter.html.contains("<p><strong>Email:</strong> N/A</p>"));
        assert!(letter.html.contains("<p>N/A</p>"));
    }

    #[test]
    fn all_fields_appear_in_both_bodies() {
        let mut i = inquiry();
        i.email = Some("asha@example.com".to_owned());
        i.quantity = Some("50 bags".to_owned());
        i.additional_details = Some("Deliver to site".to_owned());
        let letter = compose(&i, &settings()).unwrap();

        for needle in ["Asha", "9876543210", "asha@example.com", "Cement", "50 bags", "Deliver to site"] {
            assert!(letter.text.contains(needle), "text missing {needle}");
            assert!(letter.html.contains(needle), "html missing {needle}");
        }
        assert_eq!(letter.reply_to.as_deref(), Some("asha@example.com"));
    }

    #[test]
    fn details_newlines_become_line_breaks_in_html_only() {
        let mut i = inquiry();
        i.additional_details = Some("line one\nline two\r\nline three".to_owned());
        let letter = compose(&i, &settings()).unwrap();

        assert!(letter.html.contains("<p>line one<br>line two<br>line three</p>"));
        assert!(letter.text.contains("line one\nline two"));
    }

    #[test]
    fn details_markup_is_escaped_per_line() {
        let mut i = inquiry();
        i.additional_details = Some("<b>bold</b>\n& more".to_owned());
        let letter = compose(&i, &settings()).unwrap();

        assert!(letter.html.contains("<p>&lt;b&gt;bold&lt;/b&gt;<br>&amp; more</p>"));
        assert!(letter.text.contains("<b>bold</b>\n& more"));
    }

    #[test]
    fn html_values_are_escaped() {
        let mut i = inquiry();
        i.name = "<script>alert('x')</script>".to_owned();
        i.additional_details = Some("a & b".to_owned());
        let letter = compose(&i, &settings()).unwrap();

        assert!(!letter.html.contains("<script>"));
        assert!(letter.html.contains("&lt;script&gt;alert("));
        assert!(!letter.html.contains("alert('x')"));
        assert!(letter.html.contains("<p>a &amp; b</p>"));
        // Plain text keeps the raw value.
        assert!(letter.text.contains("Name: <script>"));
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let s = settings();
        let rendered = format!("{s:?}");
        assert!(!rendered.contains("app-password"));
        assert!(rendered.contains("[redacted]"));
    }
}
