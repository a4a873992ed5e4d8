//! Place catalog operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    hours::{BusinessHours, ClockTime},
    models::{Place, DEFAULT_VISIT_MINUTES},
    params::CreatePlace,
};

const UPSERT_PLACE_SQL: &str = "INSERT INTO places (id, name, description, latitude, longitude, category, open_time, close_time, estimated_duration, estimated_cost, tags, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) ON CONFLICT(id) DO UPDATE SET name = excluded.name, description = excluded.description, latitude = excluded.latitude, longitude = excluded.longitude, category = excluded.category, open_time = excluded.open_time, close_time = excluded.close_time, estimated_duration = excluded.estimated_duration, estimated_cost = excluded.estimated_cost, tags = excluded.tags";
const SELECT_PLACE_BY_ID_SQL: &str = "SELECT id, name, description, latitude, longitude, category, open_time, close_time, estimated_duration, estimated_cost, tags FROM places WHERE id = ?1";
const COUNT_ITEMS_BY_PLACE_SQL: &str = "SELECT COUNT(*) FROM itinerary_items WHERE place_id = ?1";
const DELETE_PLACE_SQL: &str = "DELETE FROM places WHERE id = ?1";
const SELECT_PLACES_SQL: &str = "SELECT id, name, description, latitude, longitude, category, open_time, close_time, estimated_duration, estimated_cost, tags FROM places ORDER BY name, id";

impl super::Database {
    /// Helper function to construct a Place from a database row
    fn build_place_from_row(row: &rusqlite::Row) -> rusqlite::Result<Place> {
        let open: Option<ClockTime> = parse_optional_column(row, 6)?;
        let close: Option<ClockTime> = parse_optional_column(row, 7)?;
        let business_hours = match (open, close) {
            (Some(open), Some(close)) => Some(BusinessHours::new(open, close)),
            _ => None,
        };

        // Tags are stored as a JSON array
        let tags: Option<String> = row.get(10)?;
        let tags = match tags {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, e.into()))?,
            None => Vec::new(),
        };

        Ok(Place {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
            category: parse_column(row, 5)?,
            business_hours,
            estimated_duration: row.get::<_, i64>(8)? as u32,
            estimated_cost: row.get(9)?,
            tags,
        })
    }

    /// Inserts a place, or replaces the stored copy with the same ID.
    pub(crate) fn upsert_place(conn: &Connection, place: &Place, now: &str) -> rusqlite::Result<usize> {
        let tags = if place.tags.is_empty() {
            None
        } else {
            let json = serde_json::to_string(&place.tags)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
            Some(json)
        };
        conn.execute(
            UPSERT_PLACE_SQL,
            params![
                &place.id,
                &place.name,
                place.description.as_deref(),
                place.latitude,
                place.longitude,
                place.category.as_str(),
                place.business_hours.map(|hours| hours.open.to_string()),
                place.business_hours.map(|hours| hours.close.to_string()),
                i64::from(place.estimated_duration),
                place.estimated_cost,
                tags,
                now
            ],
        )
    }

    /// Adds a place to the catalog with a freshly generated id.
    pub fn add_place(&mut self, params: &CreatePlace) -> Result<Place> {
        let place = Place {
            id: Uuid::new_v4().to_string(),
            name: params.name.trim().to_string(),
            description: params.description.clone(),
            latitude: params.latitude,
            longitude: params.longitude,
            category: params.category,
            business_hours: params.business_hours,
            estimated_duration: params.estimated_duration.unwrap_or(DEFAULT_VISIT_MINUTES),
            estimated_cost: params.estimated_cost,
            tags: params.tags.clone(),
        };
        self.save_place(&place)?;
        Ok(place)
    }

    /// Saves a place to the catalog.
    pub fn save_place(&mut self, place: &Place) -> Result<()> {
        let now = Timestamp::now().to_string();
        Self::upsert_place(&self.connection, place, &now).db_context("Failed to save place")?;
        Ok(())
    }

    /// Retrieves a place by ID.
    pub fn get_place(&self, id: &str) -> Result<Option<Place>> {
        self.connection
            .query_row(SELECT_PLACE_BY_ID_SQL, params![id], Self::build_place_from_row)
            .optional()
            .db_context("Failed to query place")
    }

    /// Removes a place no item refers to.
    pub fn remove_place(&mut self, id: &str) -> Result<Place> {
        let place = self
            .get_place(id)?
            .ok_or_else(|| ItineraryError::resource_not_found("Place", id))?;

        let used: i64 = self
            .connection
            .query_row(COUNT_ITEMS_BY_PLACE_SQL, params![id], |row| row.get(0))
            .db_context("Failed to count place items")?;
        if used > 0 {
            return Err(ItineraryError::invalid_input("place_id").with_reason(format!(
                "place '{}' is used by {used} item(s)",
                place.name
            )));
        }

        self.connection
            .execute(DELETE_PLACE_SQL, params![id])
            .db_context("Failed to delete place")?;
        Ok(place)
    }

    /// Lists the whole catalog by name.
    pub fn list_places(&self) -> Result<Vec<Place>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLACES_SQL)
            .db_context("Failed to prepare place query")?;

        let places = stmt
            .query_map([], Self::build_place_from_row)
            .db_context("Failed to query places")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read place rows")?;

        Ok(places)
    }
}
