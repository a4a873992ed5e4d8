//! Accommodation operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::Accommodation,
    params::CreateAccommodation,
};

const INSERT_ACCOMMODATION_SQL: &str = "INSERT INTO accommodations (id, trip_id, name, latitude, longitude, check_in, check_out, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_ACCOMMODATION_BY_ID_SQL: &str = "SELECT id, trip_id, name, latitude, longitude, check_in, check_out FROM accommodations WHERE id = ?1";
const SELECT_ACCOMMODATIONS_BY_TRIP_SQL: &str = "SELECT id, trip_id, name, latitude, longitude, check_in, check_out FROM accommodations WHERE trip_id = ?1 ORDER BY check_in, name";
const COUNT_ITEMS_BY_ACCOMMODATION_SQL: &str =
    "SELECT COUNT(*) FROM itinerary_items WHERE accommodation_id = ?1";
const DELETE_ACCOMMODATION_SQL: &str = "DELETE FROM accommodations WHERE id = ?1";

impl super::Database {
    /// Helper function to construct an Accommodation from a database row
    fn build_accommodation_from_row(row: &rusqlite::Row) -> rusqlite::Result<Accommodation> {
        Ok(Accommodation {
            id: row.get(0)?,
            trip_id: row.get(1)?,
            name: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            check_in: parse_column(row, 5)?,
            check_out: parse_column(row, 6)?,
        })
    }

    /// Adds an accommodation to a trip with a freshly generated id.
    pub fn add_accommodation(&mut self, params: &CreateAccommodation) -> Result<Accommodation> {
        if self.get_trip(&params.trip_id)?.is_none() {
            return Err(ItineraryError::TripNotFound {
                id: params.trip_id.clone(),
            });
        }

        let stay = Accommodation {
            id: Uuid::new_v4().to_string(),
            trip_id: params.trip_id.clone(),
            name: params.name.trim().to_string(),
            latitude: params.latitude,
            longitude: params.longitude,
            check_in: params.check_in,
            check_out: params.check_out,
        };
        let now = Timestamp::now().to_string();

        self.connection
            .execute(
                INSERT_ACCOMMODATION_SQL,
                params![
                    &stay.id,
                    &stay.trip_id,
                    &stay.name,
                    stay.latitude,
                    stay.longitude,
                    stay.check_in.to_string(),
                    stay.check_out.to_string(),
                    now
                ],
            )
            .db_context("Failed to insert accommodation")?;

        Ok(stay)
    }

    /// Retrieves an accommodation by ID.
    pub fn get_accommodation(&self, id: &str) -> Result<Option<Accommodation>> {
        self.connection
            .query_row(
                SELECT_ACCOMMODATION_BY_ID_SQL,
                params![id],
                Self::build_accommodation_from_row,
            )
            .optional()
            .db_context("Failed to query accommodation")
    }

    /// Lists a trip's accommodations by check-in.
    pub fn list_accommodations(&self, trip_id: &str) -> Result<Vec<Accommodation>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACCOMMODATIONS_BY_TRIP_SQL)
            .db_context("Failed to prepare accommodation query")?;

        let stays = stmt
            .query_map(params![trip_id], Self::build_accommodation_from_row)
            .db_context("Failed to query accommodations")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read accommodation rows")?;

        Ok(stays)
    }

    /// Deletes an accommodation no item refers to.
    pub fn delete_accommodation(&mut self, trip_id: &str, id: &str) -> Result<Accommodation> {
        let stay = self
            .get_accommodation(id)?
            .filter(|stay| stay.trip_id == trip_id)
            .ok_or_else(|| ItineraryError::resource_not_found("Accommodation", id))?;

        let used: i64 = self
            .connection
            .query_row(COUNT_ITEMS_BY_ACCOMMODATION_SQL, params![id], |row| row.get(0))
            .db_context("Failed to count accommodation items")?;
        if used > 0 {
            return Err(ItineraryError::invalid_input("accommodation_id").with_reason(format!(
                "accommodation '{}' is used by {used} item(s)",
                stay.name
            )));
        }

        self.connection
            .execute(DELETE_ACCOMMODATION_SQL, params![id])
            .db_context("Failed to delete accommodation")?;
        Ok(stay)
    }
}
