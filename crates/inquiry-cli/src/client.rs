//! HTTP client for the relay endpoint.
//!
//! Mirrors the website's quote-modal submit handler: one POST per submit,
//! a WhatsApp fallback link attached to every outcome, and the form cleared
//! only after the relay confirms delivery.

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use inquiry_core::fallback;
use inquiry_core::form::QuoteForm;
use inquiry_core::inquiry::InquiryPayload;

pub const SUBMITTED: &str = "Inquiry submitted successfully! You can also contact us on WhatsApp.";
pub const SUBMIT_FAILED: &str = "Failed to submit inquiry. Please try again.";
pub const NETWORK_ERROR: &str =
    "Network error. Please try again or contact us directly via WhatsApp.";

/// Whether the relay accepted the inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Error,
}

/// What the user sees after a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub kind: OutcomeKind,
    pub message: String,
    /// Pre-filled chat link, offered whatever the relay said.
    pub fallback_link: String,
}

impl SubmitOutcome {
    fn success(message: String, fallback_link: String) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message,
            fallback_link,
        }
    }

    fn error(message: String, fallback_link: String) -> Self {
        Self {
            kind: OutcomeKind::Error,
            message,
            fallback_link,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

/// Client for one relay endpoint.
pub struct QuoteClient {
    http: reqwest::Client,
    endpoint: String,
    whatsapp_number: String,
}

impl QuoteClient {
    pub fn new(endpoint: String, whatsapp_number: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            whatsapp_number,
        }
    }

    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    /// Submit the form to the relay.
    ///
    /// Takes `&mut self` so a second submit cannot start while one is in
    /// flight. The form is cleared only on a confirmed success.
    pub async fn submit(&mut self, form: &mut QuoteForm) -> SubmitOutcome {
        let link = fallback::quote_link(&self.whatsapp_number, form);

        let response = match self
            .http
            .post(&self.endpoint)
            .json(&form.to_payload())
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, endpoint = %self.endpoint, "quote submit failed");
                return SubmitOutcome::error(format!("{NETWORK_ERROR} ({e})"), link);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => return SubmitOutcome::error(format!("{NETWORK_ERROR} ({e})"), link),
        };
        debug!(status = status.as_u16(), "relay responded");

        if !status.is_success() {
            let message = match serde_json::from_str::<Value>(&body) {
                Ok(json) => reply_message(&json).unwrap_or_else(|| SUBMIT_FAILED.to_owned()),
                Err(_) => format!(
                    "Server error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                ),
            };
            return SubmitOutcome::error(message, link);
        }

        let json = match serde_json::from_str::<Value>(&body) {
            Ok(json) => json,
            Err(e) => {
                return SubmitOutcome::error(
                    format!("{NETWORK_ERROR} (invalid response body: {e})"),
                    link,
                );
            }
        };

        if json.get("success").and_then(Value::as_bool) == Some(true) {
            form.clear();
            SubmitOutcome::success(
                reply_message(&json).unwrap_or_else(|| SUBMITTED.to_owned()),
                link,
            )
        } else {
            SubmitOutcome::error(
                reply_message(&json).unwrap_or_else(|| SUBMIT_FAILED.to_owned()),
                link,
            )
        }
    }

    /// Send a newsletter sign-up through the same relay.
    ///
    /// The subscriber is thanked whether or not the relay accepts it, so a
    /// relay failure is only logged.
    ///
    /// # Errors
    ///
    /// Fails only when `email` is blank or has no `@`; nothing is sent then.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            bail!("'{email}' is not an email address");
        }

        let payload = newsletter_payload(email);
        match self.http.post(&self.endpoint).json(&payload).send().await {
            Ok(r) if r.status().is_success() => debug!("newsletter subscription relayed"),
            Ok(r) => warn!(status = r.status().as_u16(), "newsletter subscription rejected"),
            Err(e) => warn!(error = %e, "newsletter subscription error"),
        }
        Ok(())
    }
}

fn reply_message(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Fixed payload the site's footer form sends for a sign-up.
fn newsletter_payload(email: &str) -> InquiryPayload {
    InquiryPayload {
        name: Some("Newsletter Subscriber".to_owned()),
        phone: Some("N/A".to_owned()),
        email: Some(email.to_owned()),
        material_type: Some("Newsletter Subscription".to_owned()),
        quantity: Some("N/A".to_owned()),
        additional_details: Some("Newsletter subscription request".to_owned()),
    }
}
