//! Development transport that writes mail to the log instead of a relay.

use super::{NotificationSender, TransportError};
use log::info;

/// Logs every message at info level and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSender;

impl NotificationSender for ConsoleSender {
    fn send(
        &self,
        subject: &str,
        body: &str,
        from: &str,
        to: &[String],
    ) -> Result<(), TransportError> {
        info!(
            "event=mail_send module=mail status=ok backend=console from={} to={} subject={:?} body={:?}",
            from,
            to.join(","),
            subject,
            body
        );
        Ok(())
    }
}
