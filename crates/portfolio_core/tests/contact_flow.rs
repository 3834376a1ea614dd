use portfolio_core::db::open_db_in_memory;
use portfolio_core::{
    ContactError, ContactFormInput, ContactRouting, ContactService, ContactSubmission,
    NoticeLevel, NotificationSender, SqliteContactRepository, TransportError,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SentMail {
    subject: String,
    body: String,
    from: String,
    to: Vec<String>,
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<SentMail>>,
    fail: bool,
}

impl RecordingSender {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSender for RecordingSender {
    fn send(
        &self,
        subject: &str,
        body: &str,
        from: &str,
        to: &[String],
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMail {
            subject: subject.to_string(),
            body: body.to_string(),
            from: from.to_string(),
            to: to.to_vec(),
        });
        if self.fail {
            return Err(TransportError::Delivery("relay refused".to_string()));
        }
        Ok(())
    }
}

fn routing() -> ContactRouting {
    ContactRouting {
        from_email: "site@example.com".to_string(),
        contact_email: "owner@example.com".to_string(),
    }
}

fn valid_form() -> ContactFormInput {
    ContactFormInput {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        subject: "Consulting".to_string(),
        message: "Are you available in May?".to_string(),
    }
}

fn stored_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM contact_messages;", [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn missing_email_stores_nothing_and_sends_nothing() {
    let conn = open_db_in_memory().unwrap();
    let sender = Arc::new(RecordingSender::default());
    let routing = routing();
    let service = ContactService::new(
        SqliteContactRepository::new(&conn),
        Arc::clone(&sender),
        &routing,
    );

    let mut form = valid_form();
    form.email = String::new();
    let outcome = service.submit(&form).unwrap();

    match outcome {
        ContactSubmission::Rejected(context) => {
            assert_eq!(
                context.errors.email.as_deref(),
                Some("This field is required.")
            );
            assert_eq!(context.form, form);
            assert_eq!(context.meta.meta_title, "Contact Me");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(stored_count(&conn), 0);
    assert!(sender.sent().is_empty());
}

#[test]
fn valid_submission_stores_once_notifies_once_and_acknowledges() {
    let conn = open_db_in_memory().unwrap();
    let sender = Arc::new(RecordingSender::default());
    let routing = routing();
    let service = ContactService::new(
        SqliteContactRepository::new(&conn),
        Arc::clone(&sender),
        &routing,
    );

    let outcome = service.submit(&valid_form()).unwrap();
    let (message, notice, redirect_to) = match outcome {
        ContactSubmission::Accepted {
            message,
            notice,
            redirect_to,
        } => (message, notice, redirect_to),
        other => panic!("unexpected outcome: {other:?}"),
    };

    assert_eq!(redirect_to, "/contact");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Your message has been sent successfully!");
    assert_eq!(stored_count(&conn), 1);

    let (name, subject, created_at): (String, String, i64) = conn
        .query_row(
            "SELECT name, subject, created_at FROM contact_messages WHERE id = ?1;",
            [message.id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(name, "Ada");
    assert_eq!(subject, "Consulting");
    assert_eq!(created_at, message.created_at);
    assert!(created_at > 0);

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact Message: Consulting");
    assert_eq!(sent[0].from, "site@example.com");
    assert_eq!(sent[0].to, vec!["owner@example.com".to_string()]);
    assert!(sent[0].body.contains("Name: Ada\n"));
    assert!(sent[0].body.contains("Email: ada@example.com\n"));
    assert!(sent[0].body.contains("Message: Are you available in May?"));
}

#[test]
fn transport_failure_is_returned_and_message_stays_stored() {
    let conn = open_db_in_memory().unwrap();
    let sender = Arc::new(RecordingSender::failing());
    let routing = routing();
    let service = ContactService::new(
        SqliteContactRepository::new(&conn),
        Arc::clone(&sender),
        &routing,
    );

    let err = service.submit(&valid_form()).unwrap_err();
    match err {
        ContactError::Transport { message_id, source } => {
            assert!(message_id > 0);
            assert_eq!(source, TransportError::Delivery("relay refused".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(stored_count(&conn), 1);
    assert_eq!(sender.sent().len(), 1);
}

#[test]
fn stored_values_are_trimmed() {
    let conn = open_db_in_memory().unwrap();
    let sender = Arc::new(RecordingSender::default());
    let routing = routing();
    let service = ContactService::new(
        SqliteContactRepository::new(&conn),
        Arc::clone(&sender),
        &routing,
    );

    let mut form = valid_form();
    form.name = "  Ada  ".to_string();
    form.subject = "\tConsulting\n".to_string();
    service.submit(&form).unwrap();

    assert_eq!(sender.sent()[0].subject, "New Contact Message: Consulting");
    let name: String = conn
        .query_row("SELECT name FROM contact_messages;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Ada");
}
