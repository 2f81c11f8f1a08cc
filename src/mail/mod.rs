//! Outbound email for Medoka.
//!
//! Delivery is decoupled from the request/response lifecycle: handlers hand
//! a message to the [`Mailer`] queue and return immediately; a worker task
//! owns the SMTP transport and logs delivery failures.

mod mailer;

pub use mailer::{recovery_mail, verification_mail, Mailer, OutboundMail};
