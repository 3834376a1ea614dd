//! SMTP transport backed by `lettre`.

use super::{NotificationSender, TransportError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info};
use std::time::Instant;

/// Relay connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// `(username, password)`; both or neither.
    pub credentials: Option<(String, String)>,
}

/// Sends plain-text mail through an SMTP relay.
///
/// The connection is unencrypted; point it at a local relay (postfix,
/// mailpit, a sidecar) that handles onward TLS delivery.
pub struct SmtpSender {
    transport: SmtpTransport,
}

impl SmtpSender {
    pub fn new(settings: &SmtpSettings) -> Self {
        let mut builder =
            SmtpTransport::builder_dangerous(settings.host.as_str()).port(settings.port);
        if let Some((username, password)) = settings.credentials.as_ref() {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Self {
            transport: builder.build(),
        }
    }
}

impl NotificationSender for SmtpSender {
    fn send(
        &self,
        subject: &str,
        body: &str,
        from: &str,
        to: &[String],
    ) -> Result<(), TransportError> {
        let started_at = Instant::now();
        let message = build_message(subject, body, from, to)?;

        match self.transport.send(&message) {
            Ok(_) => {
                info!(
                    "event=mail_send module=mail status=ok backend=smtp recipients={} duration_ms={}",
                    to.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=mail_send module=mail status=error backend=smtp duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(TransportError::Delivery(err.to_string()))
            }
        }
    }
}

fn build_message(
    subject: &str,
    body: &str,
    from: &str,
    to: &[String],
) -> Result<Message, TransportError> {
    let from_mailbox = parse_mailbox(from)?;
    let mut builder = Message::builder().from(from_mailbox).subject(subject);
    for recipient in to {
        builder = builder.to(parse_mailbox(recipient)?);
    }
    builder
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|err| TransportError::Message(err.to_string()))
}

fn parse_mailbox(value: &str) -> Result<Mailbox, TransportError> {
    value
        .parse::<Mailbox>()
        .map_err(|err| TransportError::InvalidAddress(format!("`{value}`: {err}")))
}
