//! Accommodation model definition.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

/// Where the travellers sleep during part of a trip.
///
/// Unlike places, accommodations belong to one trip. Items can reference one
/// through `accommodation_id` instead of a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub check_in: DateTime,
    pub check_out: DateTime,
}

impl Accommodation {
    /// Calendar nights between check-in and check-out.
    pub fn nights(&self) -> i32 {
        self.check_in
            .date()
            .until(self.check_out.date())
            .map(|span| span.get_days().max(0))
            .unwrap_or(0)
    }
}
