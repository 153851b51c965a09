//! HTTP error types for the relay server.
//!
//! Every variant renders the same `{"success": false, "message": ...}` body
//! the website expects. Messages are fixed strings; error details go to the
//! log, never to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use inquiry_core::error::InquiryError;
use inquiry_core::inquiry::RelayReply;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MISSING_FIELDS: &str = "Name, phone and material type are required.";
pub const NOT_CONFIGURED: &str =
    "Email configuration is not set on the server. Please contact the site owner.";
pub const DELIVERY_FAILED: &str = "Failed to submit inquiry. Please try again later.";
pub const PAYLOAD_TOO_LARGE: &str = "Inquiry is too large.";

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Anything other than POST or OPTIONS.
    MethodNotAllowed,
    /// Name, phone, or material type missing.
    MissingFields,
    /// SMTP credentials absent on the server.
    NotConfigured,
    /// The mail relay rejected or dropped the letter, or it could not be
    /// rendered.
    DeliveryFailed,
    /// Request body exceeded the relay's body limit.
    PayloadTooLarge,
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotConfigured | Self::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED,
            Self::MissingFields => MISSING_FIELDS,
            Self::NotConfigured => NOT_CONFIGURED,
            Self::DeliveryFailed => DELIVERY_FAILED,
            Self::PayloadTooLarge => PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(RelayReply::failed(self.message()))).into_response()
    }
}

impl From<InquiryError> for AppError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::MissingFields { .. } => Self::MissingFields,
            InquiryError::NotConfigured => Self::NotConfigured,
            InquiryError::Render(_) => Self::DeliveryFailed,
        }
    }
}
