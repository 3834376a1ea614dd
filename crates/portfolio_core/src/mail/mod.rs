//! Outbound notification email.
//!
//! # Responsibility
//! - Define the transport contract used by the contact flow.
//! - Provide SMTP and console (log-only) transports.
//!
//! # Invariants
//! - `send` is synchronous; callers block until the transport returns.
//! - Transport failures are returned, never swallowed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod console;
mod smtp;

pub use console::ConsoleSender;
pub use smtp::{SmtpSender, SmtpSettings};

/// Failure raised by a [`NotificationSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Sender or recipient could not be parsed as a mailbox.
    InvalidAddress(String),
    /// The message could not be assembled.
    Message(String),
    /// The relay refused or dropped the message.
    Delivery(String),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress(message) => write!(f, "invalid mail address: {message}"),
            Self::Message(message) => write!(f, "failed to build mail message: {message}"),
            Self::Delivery(message) => write!(f, "mail delivery failed: {message}"),
        }
    }
}

impl Error for TransportError {}

/// Outbound email transport.
pub trait NotificationSender: Send + Sync {
    fn send(&self, subject: &str, body: &str, from: &str, to: &[String])
        -> Result<(), TransportError>;
}

impl<T: NotificationSender + ?Sized> NotificationSender for Arc<T> {
    fn send(
        &self,
        subject: &str,
        body: &str,
        from: &str,
        to: &[String],
    ) -> Result<(), TransportError> {
        (**self).send(subject, body, from, to)
    }
}
