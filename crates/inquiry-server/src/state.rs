//! Shared application state for the relay server.
//!
//! Built once at startup and shared read-only across handlers via `Arc`.

use std::sync::Arc;

use inquiry_core::compose::MailSettings;
use inquiry_core::mailer::Mailer;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Owner address, sender credentials, and sender display name.
    pub settings: MailSettings,
    /// Delivery backend for composed letters.
    pub mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
