//! Quote form state held by the client between edits and submits.

use crate::inquiry::InquiryPayload;

/// The quote-request form as the user fills it in.
///
/// Field names follow the form, not the wire: `material` is sent as
/// `materialType` and `message` as `additionalDetails`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub material: String,
    pub quantity: String,
    pub message: String,
}

impl QuoteForm {
    /// Payload for the relay endpoint. Every field is sent as typed, empty
    /// strings included; the server decides what counts as missing.
    #[must_use]
    pub fn to_payload(&self) -> InquiryPayload {
        InquiryPayload {
            name: Some(self.name.clone()),
            phone: Some(self.phone.clone()),
            email: Some(self.email.clone()),
            material_type: Some(self.material.clone()),
            quantity: Some(self.quantity.clone()),
            additional_details: Some(self.message.clone()),
        }
    }

    /// Reset every field after a successful submit.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_wire_field_names() {
        let form = QuoteForm {
            name: "A".to_owned(),
            phone: "123".to_owned(),
            material: "Cement".to_owned(),
            message: "call first".to_owned(),
            ..QuoteForm::default()
        };
        let json = serde_json::to_value(form.to_payload()).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "name": "A",
                "phone": "123",
                "email": "",
                "materialType": "Cement",
                "quantity": "",
                "additionalDetails": "call first",
            }))
        );
    }

    #[test]
    fn clear_resets_all_fields() {
        let mut form = QuoteForm {
            name: "A".to_owned(),
            quantity: "10".to_owned(),
            ..QuoteForm::default()
        };
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
    }
}
