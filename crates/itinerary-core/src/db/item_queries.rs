//! Itinerary item persistence.
//!
//! Items are written only through change journals drained from an
//! [`ItineraryStore`], so the rows always mirror a state the store accepted.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, Result},
    models::{ItineraryChange, ItineraryItem, Place},
    session::PlanningSession,
    store::ItineraryStore,
};

const SELECT_ITEMS_BY_TRIP_SQL: &str = "SELECT id, trip_id, day_number, item_order, place_id, accommodation_id, start_time, end_time, travel_mode, travel_duration, notes FROM itinerary_items WHERE trip_id = ?1 ORDER BY day_number, item_order, id";
const UPSERT_ITEM_SQL: &str = "INSERT INTO itinerary_items (id, trip_id, day_number, item_order, place_id, accommodation_id, start_time, end_time, travel_mode, travel_duration, notes, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) ON CONFLICT(id) DO UPDATE SET trip_id = excluded.trip_id, day_number = excluded.day_number, item_order = excluded.item_order, place_id = excluded.place_id, accommodation_id = excluded.accommodation_id, start_time = excluded.start_time, end_time = excluded.end_time, travel_mode = excluded.travel_mode, travel_duration = excluded.travel_duration, notes = excluded.notes, updated_at = excluded.updated_at";
const DELETE_ITEM_SQL: &str = "DELETE FROM itinerary_items WHERE id = ?1";

impl super::Database {
    /// Helper function to construct an ItineraryItem from a database row
    fn build_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<ItineraryItem> {
        Ok(ItineraryItem {
            id: row.get(0)?,
            trip_id: row.get(1)?,
            day_number: row.get::<_, i64>(2)? as u32,
            order: row.get::<_, i64>(3)? as u32,
            place_id: row.get(4)?,
            accommodation_id: row.get(5)?,
            start_time: parse_column(row, 6)?,
            end_time: parse_column(row, 7)?,
            travel_mode: parse_column(row, 8)?,
            travel_duration: row.get::<_, Option<i64>>(9)?.map(|minutes| minutes as u32),
            notes: row.get(10)?,
        })
    }

    /// Loads every item of a trip, by day then order.
    pub fn load_items(&self, trip_id: &str) -> Result<Vec<ItineraryItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ITEMS_BY_TRIP_SQL)
            .db_context("Failed to prepare item query")?;

        let items = stmt
            .query_map(params![trip_id], Self::build_item_from_row)
            .db_context("Failed to query items")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read item rows")?;

        Ok(items)
    }

    /// Opens a planning session for a trip with the full place catalog and
    /// the trip's accommodations.
    pub fn load_session(&self, trip_id: &str) -> Result<PlanningSession> {
        let trip = self
            .get_trip(trip_id)?
            .ok_or_else(|| ItineraryError::TripNotFound {
                id: trip_id.to_string(),
            })?;
        let items = self.load_items(trip_id)?;
        let stays = self.list_accommodations(trip_id)?;
        let store = ItineraryStore::with_items(trip, items)?;
        Ok(PlanningSession::new(store, self.list_places()?).with_accommodations(stays))
    }

    /// Applies a change journal in one transaction.
    pub fn apply_changes(&mut self, changes: &[ItineraryChange]) -> Result<usize> {
        self.persist(&[], changes)
    }

    /// Saves new places and a change journal in one transaction. Places are
    /// written first so items can reference them.
    pub fn persist(&mut self, places: &[Place], changes: &[ItineraryChange]) -> Result<usize> {
        if places.is_empty() && changes.is_empty() {
            return Ok(0);
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let now = Timestamp::now().to_string();

        for place in places {
            Self::upsert_place(&tx, place, &now).db_context("Failed to save place")?;
        }

        let mut touched_trips = Vec::new();
        for change in changes {
            match change {
                ItineraryChange::Upserted(item) => {
                    Self::upsert_item(&tx, item, &now).db_context("Failed to save item")?;
                    if !touched_trips.contains(&item.trip_id) {
                        touched_trips.push(item.trip_id.clone());
                    }
                }
                ItineraryChange::Removed { id } => {
                    tx.execute(DELETE_ITEM_SQL, params![id])
                        .db_context("Failed to delete item")?;
                }
            }
        }
        for trip_id in &touched_trips {
            Self::touch_trip(&tx, trip_id, &now).db_context("Failed to update trip timestamp")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        debug!(
            "Persisted {} place(s) and {} item change(s)",
            places.len(),
            changes.len()
        );
        Ok(changes.len())
    }

    pub(crate) fn upsert_item(conn: &Connection, item: &ItineraryItem, now: &str) -> rusqlite::Result<usize> {
        conn.execute(
            UPSERT_ITEM_SQL,
            params![
                &item.id,
                &item.trip_id,
                i64::from(item.day_number),
                i64::from(item.order),
                item.place_id.as_deref(),
                item.accommodation_id.as_deref(),
                item.start_time.to_string(),
                item.end_time.to_string(),
                item.travel_mode.as_str(),
                item.travel_duration.map(i64::from),
                item.notes.as_deref(),
                now
            ],
        )
    }
}
