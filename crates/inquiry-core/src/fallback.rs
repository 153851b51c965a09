//! WhatsApp deep links offered alongside every submit result.
//!
//! Links are computed locally from the form and are never sent to the relay.

use crate::form::QuoteForm;

/// Business number the links open a chat with.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "9877443093";

/// Greeting used by the always-visible contact button.
pub const DEFAULT_GREETING: &str =
    "Hello, I would like to know more about your building materials.";

const WA_BASE: &str = "https://wa.me";

/// Link pre-filled with the contents of a quote form.
#[must_use]
pub fn quote_link(number: &str, form: &QuoteForm) -> String {
    let details = if form.message.is_empty() {
        "N/A"
    } else {
        form.message.as_str()
    };

    let text = format!(
        "Hello, I want a quote.\n\
         \n\
         Name: {}\n\
         Phone: {}\n\
         Email: {}\n\
         Material: {}\n\
         Quantity: {}\n\
         Details: {details}",
        form.name, form.phone, form.email, form.material, form.quantity,
    );

    chat_link(number, &text)
}

/// Link with the generic greeting, independent of any form.
#[must_use]
pub fn general_link(number: &str) -> String {
    chat_link(number, DEFAULT_GREETING)
}

fn chat_link(number: &str, text: &str) -> String {
    format!("{WA_BASE}/{number}?text={}", encode_component(text))
}

/// Percent-encode like `encodeURIComponent`: everything except ASCII
/// alphanumerics and `-_.!~*'()` is escaped as UTF-8 bytes.
fn encode_component(text: &str) -> String {
    // urlencoding leaves only `-_.~` unescaped; restore the remaining marks.
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}
