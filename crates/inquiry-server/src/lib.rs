//! Inquiry relay HTTP server.
//!
//! Exposes the `/send-mail` endpoint that validates quote requests from the
//! website and forwards each one to the owner's inbox through an SMTP
//! relay. The router is built here so integration tests can drive it
//! without binding a socket.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
