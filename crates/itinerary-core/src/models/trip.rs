//! Trip model definition.

use jiff::{civil::Date, ToSpan};
use serde::{Deserialize, Serialize};

use super::TravelMode;
use crate::error::{ItineraryError, Result};

/// A trip: the date range every itinerary day is anchored to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: String,

    /// Title of the trip
    pub name: String,

    /// Destination country code, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,

    /// First day of the trip (day 1)
    pub start_date: Date,

    /// Last day of the trip, inclusive
    pub end_date: Date,

    /// Travel mode new items default to
    #[serde(default)]
    pub preferred_transport: TravelMode,
}

impl Trip {
    /// Number of days covered by the trip, counting both ends.
    pub fn day_count(&self) -> u32 {
        self.start_date
            .until(self.end_date)
            .map(|span| span.get_days().max(0) as u32 + 1)
            .unwrap_or(1)
    }

    /// Calendar date of a 1-indexed trip day.
    pub fn date_of_day(&self, day_number: u32) -> Result<Date> {
        if day_number < 1 {
            return Err(ItineraryError::invariant("day number must be at least 1"));
        }
        let offset = i64::from(day_number - 1);
        self.start_date
            .checked_add(offset.days())
            .map_err(|e| {
                ItineraryError::invalid_input("day_number")
                    .with_reason(format!("day {day_number} is out of calendar range: {e}"))
            })
    }

    /// Whether the day number falls inside the trip.
    pub fn contains_day(&self, day_number: u32) -> bool {
        (1..=self.day_count()).contains(&day_number)
    }
}
