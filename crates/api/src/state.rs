//! Application state shared across handlers.

use records_data::Database;

/// State injected into every handler. Clones share the underlying pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Creates the application state around a connected database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
