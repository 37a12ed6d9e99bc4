use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

use crate::db::Database;

/// Audit name stamped on every write made through the service.
pub(crate) const ACTOR: &str = crate::db::DEFAULT_ACTOR;

/// One SQLite connection shared by all requests. Writes are serialised by
/// the mutex; the last committed write wins.
#[derive(Clone)]
pub(crate) struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub(crate) fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    pub(crate) fn with_db<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow!("Database lock poisoned"))?;
        f(&db)
    }
}
