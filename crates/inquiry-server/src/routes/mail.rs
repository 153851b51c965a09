//! HTTP route handlers for the inquiry mail relay.
//!
//! Endpoints (mounted at both `/send-mail` and `/api/send-mail`):
//! - `OPTIONS` — CORS preflight, empty 200
//! - `POST` — validate, compose, and send one inquiry letter
//! - anything else — 405

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{MethodRouter, post};
use axum::Json;
use tracing::{error, info, warn};

use inquiry_core::compose::compose;
use inquiry_core::error::InquiryError;
use inquiry_core::inquiry::{InquiryPayload, RelayReply};

use crate::error::AppError;
use crate::state::AppState;

pub const SENT: &str = "Inquiry sent successfully!";

/// Largest request body the relay buffers. A filled-in quote form is a few
/// hundred bytes.
pub const BODY_LIMIT: usize = 64 * 1024;

/// Method router for the relay endpoint.
pub fn method_router() -> MethodRouter<Arc<AppState>> {
    post(send_mail)
        .options(preflight)
        .fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn send_mail(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RelayReply>, AppError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(limit = BODY_LIMIT, "inquiry body too large");
            return Err(AppError::PayloadTooLarge);
        }
        Err(rejection) => {
            warn!(reason = %rejection, "could not read inquiry body");
            Bytes::new()
        }
    };
    relay(&state, &body).await.map(Json)
}

/// Validate, compose, and deliver one inquiry.
///
/// Validation and the configuration check both happen before the mailer
/// is touched, so a rejected request never produces a send attempt.
///
/// # Errors
///
/// - [`AppError::MissingFields`] when name, phone, or material type is blank
/// - [`AppError::NotConfigured`] when SMTP credentials are absent
/// - [`AppError::DeliveryFailed`] when the letter cannot be rendered or the
///   mailer reports an error
pub async fn relay(state: &AppState, body: &[u8]) -> Result<RelayReply, AppError> {
    let inquiry = InquiryPayload::from_json_slice(body)
        .validate()
        .inspect_err(|e| warn!(reason = %e, "inquiry rejected"))?;

    let letter = compose(&inquiry, &state.settings).inspect_err(|e| match e {
        InquiryError::NotConfigured => {
            error!("missing email configuration: set SMTP_USER and SMTP_PASS");
        }
        other => error!(error = %other, "could not compose inquiry letter"),
    })?;

    if let Err(e) = state.mailer.send(&letter).await {
        error!(error = %e, "error sending inquiry email");
        return Err(AppError::DeliveryFailed);
    }

    info!(
        material = %inquiry.material_type,
        has_email = inquiry.email.is_some(),
        "inquiry relayed"
    );
    Ok(RelayReply::ok(SENT))
}
