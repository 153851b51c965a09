//! Liveness probe for the hosting platform.
//!
//! `GET /health` — always 200; reports whether SMTP credentials are loaded
//! so a misconfigured deploy is visible without sending a test inquiry.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "mail_configured": state.settings.is_configured(),
    }))
}
