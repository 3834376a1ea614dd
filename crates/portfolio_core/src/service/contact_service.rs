//! Contact submission flow.
//!
//! # Responsibility
//! - Validate a submitted form, persist it, notify the site owner, and hand
//!   back the acknowledgement the HTTP layer turns into a redirect.
//!
//! # Invariants
//! - A rejected form causes no insert and no notification.
//! - An accepted form causes exactly one insert, then exactly one send.
//! - The insert happens before the send and is not rolled back when the send
//!   fails; the transport error is returned to the caller.

use crate::config::ContactRouting;
use crate::mail::{NotificationSender, TransportError};
use crate::model::contact::{ContactFormErrors, ContactFormInput, ContactMessage};
use crate::model::flash::FlashNotice;
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoError;
use crate::service::page_service::PageMeta;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Where the client is sent after a successful submission.
pub const CONTACT_PATH: &str = "/contact";
pub const CONTACT_SUCCESS_MESSAGE: &str = "Your message has been sent successfully!";
const NOTIFICATION_SUBJECT_PREFIX: &str = "New Contact Message: ";

/// Failure after validation succeeded.
#[derive(Debug)]
pub enum ContactError {
    Repo(RepoError),
    /// The message was stored but the notification could not be delivered.
    Transport {
        message_id: i64,
        source: TransportError,
    },
}

impl Display for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Transport { message_id, source } => write!(
                f,
                "contact message {message_id} stored but notification failed: {source}"
            ),
        }
    }
}

impl Error for ContactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Transport { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for ContactError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Render context for the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactContext {
    pub meta: PageMeta,
    /// Values echoed back into the form fields.
    pub form: ContactFormInput,
    pub errors: ContactFormErrors,
}

impl ContactContext {
    /// Empty form for the initial GET.
    pub fn blank() -> Self {
        Self {
            meta: PageMeta::contact(),
            form: ContactFormInput::default(),
            errors: ContactFormErrors::default(),
        }
    }
}

/// Terminal outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactSubmission {
    /// Stored and notified; redirect to `redirect_to` carrying `notice`.
    Accepted {
        message: ContactMessage,
        notice: FlashNotice,
        redirect_to: &'static str,
    },
    /// Invalid input; render the form again with field errors.
    Rejected(ContactContext),
}

/// Contact use-case service.
pub struct ContactService<'a, R: ContactRepository, N: NotificationSender> {
    repo: R,
    sender: N,
    routing: &'a ContactRouting,
}

impl<'a, R: ContactRepository, N: NotificationSender> ContactService<'a, R, N> {
    pub fn new(repo: R, sender: N, routing: &'a ContactRouting) -> Self {
        Self {
            repo,
            sender,
            routing,
        }
    }

    /// Runs validate → persist → notify → acknowledge for one form.
    ///
    /// # Errors
    /// - [`ContactError::Repo`] when the insert fails (nothing was sent).
    /// - [`ContactError::Transport`] when delivery fails (the row stays stored).
    pub fn submit(&self, input: &ContactFormInput) -> Result<ContactSubmission, ContactError> {
        let new_message = match input.validate() {
            Ok(message) => message,
            Err(errors) => {
                info!(
                    "event=contact_submit module=contact status=rejected name_error={} email_error={} subject_error={} message_error={}",
                    errors.name.is_some(),
                    errors.email.is_some(),
                    errors.subject.is_some(),
                    errors.message.is_some()
                );
                return Ok(ContactSubmission::Rejected(ContactContext {
                    meta: PageMeta::contact(),
                    form: input.clone(),
                    errors,
                }));
            }
        };

        let stored = self.repo.create_message(&new_message)?;
        info!(
            "event=contact_submit module=contact status=stored message_id={}",
            stored.id
        );

        let to = vec![self.routing.contact_email.clone()];
        if let Err(err) = self.sender.send(
            &notification_subject(&stored),
            &notification_body(&stored),
            &self.routing.from_email,
            &to,
        ) {
            error!(
                "event=contact_submit module=contact status=error message_id={} error_code=notify_failed error={}",
                stored.id, err
            );
            return Err(ContactError::Transport {
                message_id: stored.id,
                source: err,
            });
        }

        info!(
            "event=contact_submit module=contact status=ok message_id={}",
            stored.id
        );

        Ok(ContactSubmission::Accepted {
            message: stored,
            notice: FlashNotice::success(CONTACT_SUCCESS_MESSAGE),
            redirect_to: CONTACT_PATH,
        })
    }
}

/// `"New Contact Message: <subject>"`.
pub fn notification_subject(message: &ContactMessage) -> String {
    format!("{NOTIFICATION_SUBJECT_PREFIX}{}", message.subject)
}

/// Plain-text body with one labelled line per field.
pub fn notification_body(message: &ContactMessage) -> String {
    format!(
        "Name: {}\nEmail: {}\nMessage: {}\n",
        message.name, message.email, message.message
    )
}
