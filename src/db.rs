use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::time::Duration;

use crate::config::Config;
use crate::db_storage::LeadStorage;

pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Builds a lazy pool over the SQLite file. No connection is opened until
    /// the first statement runs, so a missing or unwritable store only shows
    /// up as statement errors later on.
    pub fn new(config: &Config) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(config.db_busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Opens the store and makes sure the `leads` table exists.
    ///
    /// Failure is logged and reported as `false`; startup carries on and
    /// later writes will fail on their own.
    pub async fn initialize(&self) -> bool {
        match LeadStorage::new(self.pool.clone()).ensure_schema().await {
            Ok(()) => {
                tracing::info!("Database initialized.");
                true
            }
            Err(e) => {
                tracing::error!("Error initializing database: {}", e);
                false
            }
        }
    }
}
