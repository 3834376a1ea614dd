//! Shared, immutable application state.

use portfolio_core::db::{open_db, DbResult};
use portfolio_core::{ContactRouting, NotificationSender};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
    pub sender: Arc<dyn NotificationSender>,
    pub routing: Arc<ContactRouting>,
}

impl AppState {
    pub fn new(
        db_path: PathBuf,
        sender: Arc<dyn NotificationSender>,
        routing: ContactRouting,
    ) -> Self {
        Self {
            db_path: Arc::new(db_path),
            sender,
            routing: Arc::new(routing),
        }
    }

    /// Opens a request-scoped connection. Blocking; call from a blocking task.
    pub fn open_db(&self) -> DbResult<Connection> {
        open_db(self.db_path.as_path())
    }
}
