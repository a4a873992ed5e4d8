//! Builder for [`Planner`] instances.
//!
//! The database location is resolved in this order:
//!
//! 1. the path given to [`PlannerBuilder::with_database_path`]
//! 2. `$XDG_DATA_HOME/itinerary/itinerary.db`
//! 3. `~/.local/share/itinerary/itinerary.db`

use std::path::{Path, PathBuf};

use jiff::civil;
use log::debug;

use super::Planner;
use crate::{
    applier::DEFAULT_DAY_START,
    db::Database,
    error::{ItineraryError, Result},
};

const XDG_PREFIX: &str = "itinerary";
const DATABASE_FILE: &str = "itinerary.db";

/// Configures and creates a [`Planner`].
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    day_start: civil::Time,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self {
            database_path: None,
            day_start: DEFAULT_DAY_START,
        }
    }

    /// Uses this database file instead of the XDG default. `None` keeps the
    /// current setting, so an optional CLI flag can be passed straight in.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Time of day at which suggested places start on a day with nothing
    /// else planned. Defaults to 09:00.
    pub fn with_day_start(mut self, day_start: Option<civil::Time>) -> Self {
        if let Some(day_start) = day_start {
            self.day_start = day_start;
        }
        self
    }

    /// Creates the database directory and schema, then returns the planner.
    ///
    /// # Errors
    ///
    /// `FileSystem` when the directory cannot be created, `XdgDirectory` when
    /// no default location exists, `Database` when the schema cannot be set up.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => xdg::BaseDirectories::with_prefix(XDG_PREFIX)
                .place_data_file(DATABASE_FILE)
                .map_err(|e| ItineraryError::XdgDirectory(e.to_string()))?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ItineraryError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let planner = Planner::new(db_path, self.day_start);
        planner.with_database(|_db: &mut Database| Ok(())).await?;

        debug!(
            "Planner ready at {} (day start {})",
            planner.db_path.display(),
            self.day_start
        );
        Ok(planner)
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
