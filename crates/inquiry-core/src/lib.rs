//! Core library for the inquiry relay.
//!
//! Holds everything the relay endpoint and the submit client share: the
//! inquiry payload and its validation rules, composition of the owner-facing
//! letter, the [`mailer::Mailer`] seam with its SMTP implementation, the quote
//! form state, and the WhatsApp fallback links. Nothing in here knows about
//! HTTP routing.

pub mod compose;
pub mod error;
pub mod fallback;
pub mod form;
pub mod inquiry;
pub mod mailer;
