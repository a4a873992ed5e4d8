//! Trip CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::{ItineraryItem, Trip},
    params::CreateTrip,
};

const INSERT_TRIP_SQL: &str = "INSERT INTO trips (id, name, country_id, start_date, end_date, preferred_transport, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_TRIP_BY_ID_SQL: &str = "SELECT id, name, country_id, start_date, end_date, preferred_transport FROM trips WHERE id = ?1";
const SELECT_TRIPS_SQL: &str = "SELECT id, name, country_id, start_date, end_date, preferred_transport FROM trips ORDER BY start_date, name";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET name = ?1, country_id = ?2, start_date = ?3, end_date = ?4, preferred_transport = ?5, updated_at = ?6 WHERE id = ?7";
const DELETE_TRIP_ITEMS_SQL: &str = "DELETE FROM itinerary_items WHERE trip_id = ?1";
const DELETE_TRIP_ACCOMMODATIONS_SQL: &str = "DELETE FROM accommodations WHERE trip_id = ?1";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";
const TOUCH_TRIP_SQL: &str = "UPDATE trips SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Trip from a database row
    pub(crate) fn build_trip_from_row(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: row.get(0)?,
            name: row.get(1)?,
            country_id: row.get(2)?,
            start_date: parse_column(row, 3)?,
            end_date: parse_column(row, 4)?,
            preferred_transport: parse_column(row, 5)?,
        })
    }

    /// Creates a trip with a freshly generated id.
    pub fn create_trip(&mut self, params: &CreateTrip) -> Result<Trip> {
        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            name: params.name.trim().to_string(),
            country_id: params.country_id.clone(),
            start_date: params.start_date,
            end_date: params.end_date,
            preferred_transport: params.preferred_transport,
        };
        let now = Timestamp::now().to_string();

        self.connection
            .execute(
                INSERT_TRIP_SQL,
                params![
                    &trip.id,
                    &trip.name,
                    trip.country_id.as_deref(),
                    trip.start_date.to_string(),
                    trip.end_date.to_string(),
                    trip.preferred_transport.as_str(),
                    &now,
                    &now
                ],
            )
            .db_context("Failed to insert trip")?;

        Ok(trip)
    }

    /// Retrieves a trip by ID.
    pub fn get_trip(&self, id: &str) -> Result<Option<Trip>> {
        self.connection
            .query_row(SELECT_TRIP_BY_ID_SQL, params![id], Self::build_trip_from_row)
            .optional()
            .db_context("Failed to query trip")
    }

    /// Lists all trips, earliest first.
    pub fn list_trips(&self) -> Result<Vec<Trip>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRIPS_SQL)
            .db_context("Failed to prepare trip query")?;

        let trips = stmt
            .query_map([], Self::build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trip rows")?;

        Ok(trips)
    }

    /// Saves a changed trip together with items whose times moved with it,
    /// in one transaction.
    pub fn update_trip(&mut self, trip: &Trip, moved_items: &[ItineraryItem]) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let now = Timestamp::now().to_string();

        let updated = tx
            .execute(
                UPDATE_TRIP_SQL,
                params![
                    &trip.name,
                    trip.country_id.as_deref(),
                    trip.start_date.to_string(),
                    trip.end_date.to_string(),
                    trip.preferred_transport.as_str(),
                    &now,
                    &trip.id
                ],
            )
            .db_context("Failed to update trip")?;
        if updated == 0 {
            return Err(ItineraryError::TripNotFound {
                id: trip.id.clone(),
            });
        }
        for item in moved_items {
            Self::upsert_item(&tx, item, &now).db_context("Failed to save item")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Updated trip {} and moved {} item(s)",
            trip.id,
            moved_items.len()
        );
        Ok(())
    }

    /// Deletes a trip with its items and accommodations.
    pub fn delete_trip(&mut self, id: &str) -> Result<Trip> {
        let trip = self
            .get_trip(id)?
            .ok_or_else(|| ItineraryError::TripNotFound { id: id.to_string() })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let items = tx
            .execute(DELETE_TRIP_ITEMS_SQL, params![id])
            .db_context("Failed to delete trip items")?;
        let stays = tx
            .execute(DELETE_TRIP_ACCOMMODATIONS_SQL, params![id])
            .db_context("Failed to delete trip accommodations")?;
        tx.execute(DELETE_TRIP_SQL, params![id])
            .db_context("Failed to delete trip")?;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted trip {id} with {items} item(s) and {stays} accommodation(s)");
        Ok(trip)
    }

    pub(crate) fn touch_trip(conn: &rusqlite::Connection, id: &str, now: &str) -> rusqlite::Result<usize> {
        conn.execute(TOUCH_TRIP_SQL, params![now, id])
    }
}
