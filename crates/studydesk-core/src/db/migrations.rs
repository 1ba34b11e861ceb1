//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Schema version written by this build.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Applies the embedded schema and any pending migrations.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// The `user_version` recorded in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    fn apply_migrations(&self) -> Result<()> {
        let current = self.schema_version()?;
        if current >= SCHEMA_VERSION {
            return Ok(());
        }

        // Version 1 is the embedded schema itself; later versions add their
        // ALTER statements here, guarded by `current`.
        log::debug!("Migrating database schema from version {current} to {SCHEMA_VERSION}");
        self.connection
            .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .db_context("Failed to record schema version")
    }
}
