//! The inquiry payload submitted by the quote form.
//!
//! A payload lives for exactly one request: it is decoded from the request
//! body, validated into a [`ValidInquiry`], composed into a letter, and then
//! dropped. Nothing is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InquiryError;

/// Raw form payload as posted by the client.
///
/// Every field is optional at this stage; [`InquiryPayload::validate`]
/// enforces the required ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}

/// JSON body of every relay response, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl RelayReply {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A payload whose required fields are present and non-blank.
///
/// Blank optional fields have been normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInquiry {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub material_type: String,
    pub quantity: Option<String>,
    pub additional_details: Option<String>,
}

impl InquiryPayload {
    /// Decode a request body without ever failing.
    ///
    /// An empty, malformed, or non-object body decodes to an empty payload,
    /// which validation then rejects. Truthy scalars (non-zero numbers,
    /// `true`) are accepted as their string form; `false`, zero, arrays,
    /// objects, and `null` count as absent.
    #[must_use]
    pub fn from_json_slice(body: &[u8]) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
            tracing::debug!(len = body.len(), "request body is not a JSON object");
            return Self::default();
        };

        let field = |key: &str| match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Some(Value::Bool(true)) => Some("true".to_owned()),
            _ => None,
        };

        Self {
            name: field("name"),
            phone: field("phone"),
            email: field("email"),
            material_type: field("materialType"),
            quantity: field("quantity"),
            additional_details: field("additionalDetails"),
        }
    }

    /// Check the required fields and normalize the optional ones.
    ///
    /// # Errors
    ///
    /// Returns [`InquiryError::MissingFields`] naming every required field
    /// (`name`, `phone`, `materialType`) that is absent or blank.
    pub fn validate(self) -> Result<ValidInquiry, InquiryError> {
        let name = non_blank(self.name);
        let phone = non_blank(self.phone);
        let material_type = non_blank(self.material_type);

        match (name, phone, material_type) {
            (Some(name), Some(phone), Some(material_type)) => Ok(ValidInquiry {
                name,
                phone,
                email: non_blank(self.email),
                material_type,
                quantity: non_blank(self.quantity),
                additional_details: non_blank(self.additional_details),
            }),
            (name, phone, material_type) => {
                let mut fields = Vec::new();
                if name.is_none() {
                    fields.push("name");
                }
                if phone.is_none() {
                    fields.push("phone");
                }
                if material_type.is_none() {
                    fields.push("materialType");
                }
                Err(InquiryError::MissingFields { fields })
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
