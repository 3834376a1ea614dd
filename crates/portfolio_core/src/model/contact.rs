//! Contact form input, validation and the persisted message record.
//!
//! # Responsibility
//! - Decode raw form fields without failing on missing keys.
//! - Turn raw input into a [`NewContactMessage`] or per-field errors.
//!
//! # Invariants
//! - Every field is trimmed before validation and persistence.
//! - A [`NewContactMessage`] can only be obtained through [`ContactFormInput::validate`].

use lettre::Address;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const SUBJECT_MAX_CHARS: usize = 200;

const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";

/// Raw contact form submission.
///
/// Missing keys decode as empty strings so that validation, not the decoder,
/// reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Per-field validation messages; `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

/// Validated, trimmed values ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Stored contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl ContactFormInput {
    /// Validates all fields at once and reports every failing field.
    ///
    /// # Errors
    /// - Returns [`ContactFormErrors`] when any field is blank, too long, or
    ///   when `email` is not a syntactically valid address.
    pub fn validate(&self) -> Result<NewContactMessage, ContactFormErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let subject = self.subject.trim();
        let message = self.message.trim();

        let errors = ContactFormErrors {
            name: check_text(name, Some(NAME_MAX_CHARS)),
            email: check_text(email, Some(EMAIL_MAX_CHARS)).or_else(|| {
                if is_valid_email(email) {
                    None
                } else {
                    Some(INVALID_EMAIL_MESSAGE.to_string())
                }
            }),
            subject: check_text(subject, Some(SUBJECT_MAX_CHARS)),
            message: check_text(message, None),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}

/// Returns whether `value` is a syntactically valid email address.
///
/// Uses the same address grammar as the SMTP transport, so anything accepted
/// here can be used as a mail header. Shared by form validation and
/// configuration loading.
pub fn is_valid_email(value: &str) -> bool {
    value.parse::<Address>().is_ok()
}

fn check_text(value: &str, max_chars: Option<usize>) -> Option<String> {
    if value.is_empty() {
        return Some(REQUIRED_MESSAGE.to_string());
    }
    let actual = value.chars().count();
    match max_chars {
        Some(max) if actual > max => Some(format!(
            "Ensure this value has at most {max} characters (it has {actual})."
        )),
        _ => None,
    }
}
