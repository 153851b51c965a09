//! Server configuration for the inquiry relay.
//!
//! Loaded once at startup from environment variables with sensible defaults.
//! Missing SMTP credentials are not a startup error: the server runs and
//! answers each inquiry with a configuration error until they are set.

use std::net::SocketAddr;
use std::time::Duration;

use inquiry_core::compose::MailSettings;
use inquiry_core::mailer::{SmtpConfig, TlsMode};

/// Default listener address (the site's dev proxy points here).
const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3001);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Owner address, sender credentials, and sender display name.
    pub mail: MailSettings,
    /// SMTP relay connection settings.
    pub smtp: SmtpConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RELAY_BIND_ADDR` — full bind address (default: `127.0.0.1:3001`)
    /// - `PORT` — port to bind on `0.0.0.0` when `RELAY_BIND_ADDR` is unset
    /// - `RELAY_LOG_LEVEL` — log filter (default: `info`)
    /// - `OWNER_EMAIL` — inbox receiving inquiries (default: `SMTP_USER`)
    /// - `SMTP_USER` / `SMTP_PASS` — relay account (required to send)
    /// - `SMTP_HOST` — relay host (default: `smtp.gmail.com`)
    /// - `SMTP_PORT` — relay port (default: `587`)
    /// - `SMTP_TLS` — `starttls`, `tls`, or `none` (default: `starttls`)
    /// - `SMTP_TIMEOUT_SECS` — connection timeout (default: `10`)
    /// - `RELAY_SENDER_NAME` — `From` display name (default: `Shiv Shankar Website`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: RELAY_BIND_ADDR > PORT > default 127.0.0.1:3001
        let bind_addr = if let Some(addr) = lookup("RELAY_BIND_ADDR") {
            addr.parse().unwrap_or_else(|_| SocketAddr::from(DEFAULT_BIND))
        } else if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(DEFAULT_BIND)
        };

        let log_level = lookup("RELAY_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let mail = MailSettings::new(
            lookup("OWNER_EMAIL"),
            lookup("SMTP_USER"),
            lookup("SMTP_PASS"),
            lookup("RELAY_SENDER_NAME"),
        );

        let defaults = SmtpConfig::default();
        let smtp = SmtpConfig {
            host: lookup("SMTP_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            tls: lookup("SMTP_TLS")
                .and_then(|v| v.parse::<TlsMode>().ok())
                .unwrap_or(defaults.tls),
            timeout: lookup("SMTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
        };

        Self {
            bind_addr,
            log_level,
            mail,
            smtp,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let c = config(&[]);
        assert_eq!(c.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3001)));
        assert_eq!(c.log_level, "info");
        assert!(!c.mail.is_configured());
        assert_eq!(c.smtp.host, "smtp.gmail.com");
        assert_eq!(c.smtp.port, 587);
        assert_eq!(c.smtp.tls, TlsMode::StartTls);
        assert_eq!(c.smtp.timeout, Duration::from_secs(10));
    }

    #[test]
    fn port_binds_all_interfaces() {
        let c = config(&[("PORT", "8080")]);
        assert_eq!(c.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let c = config(&[("PORT", "8080"), ("RELAY_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(c.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn credentials_require_both_user_and_pass() {
        assert!(!config(&[("SMTP_USER", "relay@example.com")]).mail.is_configured());
        assert!(!config(&[("SMTP_PASS", "secret")]).mail.is_configured());
        let c = config(&[
            ("SMTP_USER", "relay@example.com"),
            ("SMTP_PASS", "secret"),
            ("OWNER_EMAIL", "owner@example.com"),
        ]);
        assert!(c.mail.is_configured());
        assert_eq!(c.mail.owner_email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn smtp_overrides_are_applied() {
        let c = config(&[
            ("SMTP_HOST", "mail.local"),
            ("SMTP_PORT", "2525"),
            ("SMTP_TLS", "none"),
            ("SMTP_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(c.smtp.host, "mail.local");
        assert_eq!(c.smtp.port, 2525);
        assert_eq!(c.smtp.tls, TlsMode::None);
        assert_eq!(c.smtp.timeout, Duration::from_secs(3));
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let c = config(&[("SMTP_PORT", "many"), ("SMTP_TLS", "ssl2"), ("PORT", "-1")]);
        assert_eq!(c.smtp.port, 587);
        assert_eq!(c.smtp.tls, TlsMode::StartTls);
        assert_eq!(c.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3001)));
    }
}
