//! High-level async API over the itinerary database.
//!
//! [`Planner`] is the entry point front ends use. Each call opens its own
//! connection on tokio's blocking pool, so the facade is cheap to clone and
//! safe to share.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Planner      │    │ PlanningSession │    │    Database     │
//! │  (async, ops)   │───▶│ (store, applier,│───▶│ (change journal │
//! │                 │    │  drag, hours)   │    │  persistence)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Item mutations load the trip into a [`PlanningSession`], run the
//! operation against its store, and persist the drained change journal in
//! one transaction. A rejected operation persists nothing.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances
//! - [`trip_ops`]: trips and the place catalog
//! - [`accommodation_ops`]: where the travellers stay
//! - [`item_ops`]: item and day operations
//! - [`optimize_ops`]: optimize round trips
//!
//! # Examples
//!
//! ```rust,no_run
//! use itinerary_core::{params::CreateTrip, PlannerBuilder};
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/itinerary.db"))
//!     .build()
//!     .await?;
//!
//! let trip = planner
//!     .create_trip(&CreateTrip {
//!         name: "Seoul".to_string(),
//!         country_id: Some("KR".to_string()),
//!         start_date: date(2024, 5, 1),
//!         end_date: date(2024, 5, 4),
//!         preferred_transport: Default::default(),
//!     })
//!     .await?;
//! println!("{trip}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use jiff::civil;
use tokio::task;

use crate::{
    applier::SuggestionApplier,
    db::Database,
    error::{ItineraryError, Result},
    session::PlanningSession,
};

pub mod accommodation_ops;
pub mod builder;
pub mod item_ops;
pub mod optimize_ops;
pub mod trip_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use optimize_ops::OptimizeOutcome;

/// Main planner interface for managing trips and their itineraries.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    day_start: civil::Time,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, day_start: civil::Time) -> Self {
        Self { db_path, day_start }
    }

    /// Path of the database file this planner works on.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Start time for suggestions placed on an otherwise empty day.
    pub fn day_start(&self) -> civil::Time {
        self.day_start
    }

    /// Runs a blocking database operation on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| ItineraryError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Loads a trip into a session, runs `edit` on it and persists what it
    /// changed. Nothing is written if `edit` fails.
    pub(crate) async fn edit_session<T, F>(&self, trip_id: &str, edit: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PlanningSession) -> Result<T> + Send + 'static,
    {
        let trip_id = trip_id.to_string();
        let day_start = self.day_start;
        self.with_database(move |db| {
            let mut session = load_session(db, &trip_id, day_start)?;
            let value = edit(&mut session)?;
            let places = session.take_new_places();
            let changes = session.store_mut().take_changes();
            db.persist(&places, &changes)?;
            Ok(value)
        })
        .await
    }

    /// Opens a planning session for a trip.
    ///
    /// The session is detached from the database; call
    /// [`Planner::save_session`] to persist its changes.
    pub async fn open_session(&self, trip_id: &str) -> Result<PlanningSession> {
        let trip_id = trip_id.to_string();
        let day_start = self.day_start;
        self.with_database(move |db| load_session(db, &trip_id, day_start))
            .await
    }

    /// Persists the places and item changes a session has accumulated.
    ///
    /// Returns the number of item changes written.
    pub async fn save_session(&self, session: &mut PlanningSession) -> Result<usize> {
        let places = session.take_new_places();
        let changes = session.store_mut().take_changes();
        self.with_database(move |db| db.persist(&places, &changes))
            .await
    }
}

fn load_session(db: &Database, trip_id: &str, day_start: civil::Time) -> Result<PlanningSession> {
    let session = db.load_session(trip_id)?;
    Ok(session.with_applier(SuggestionApplier::new().with_day_start(day_start)))
}
