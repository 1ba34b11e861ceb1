//! SQLite storage for week plans and their tasks.
//!
//! Every row is keyed by user id, so one database file can hold the plans of
//! several users. Task order inside a week is insertion order, kept in the
//! `list_order` column.

use std::{path::Path, str::FromStr};

use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod task_queries;
pub mod week_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and brings its schema up to
    /// date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database, mostly useful for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a text column, reporting failures as a conversion error on
/// column `idx`.
fn parse_text<T>(idx: usize, value: &str, what: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid {what} '{value}': {e}"),
            )),
        )
    })
}
