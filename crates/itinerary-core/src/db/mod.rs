//! SQLite persistence for trips, places, accommodations and itinerary items.
//!
//! The database plays the role of the CRUD service behind the itinerary
//! engine. The store never writes here directly: committed mutations are
//! drained from its change journal and applied with
//! [`Database::apply_changes`], one transaction per batch.

use std::{path::Path, str::FromStr};

use rusqlite::{types::Type, Connection, Row};

use crate::error::{DatabaseResultExt, Result};

pub mod accommodation_queries;
pub mod item_queries;
pub mod place_queries;
pub mod schema;
pub mod trip_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads a text column and parses it with `FromStr`.
pub(crate) fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: String = row.get(index)?;
    text.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

/// Like [`parse_column`] for nullable columns.
pub(crate) fn parse_optional_column<T>(row: &Row, index: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let text: Option<String> = row.get(index)?;
    text.map(|text| {
        text.parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
    })
    .transpose()
}
