//! Itinerary item model definition.

use jiff::{civil::DateTime, SignedDuration};
use serde::{Deserialize, Serialize};

use super::TravelMode;

/// One scheduled visit or stay within a trip, anchored to a day and an order
/// position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    /// Unique identifier for the item
    pub id: String,

    /// ID of the trip the item belongs to
    pub trip_id: String,

    /// 1-indexed day of the trip
    pub day_number: u32,

    /// Position within the day (0-indexed, contiguous)
    pub order: u32,

    /// Place being visited, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    /// Accommodation being stayed at, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_id: Option<String>,

    /// Local wall-clock start of the visit
    pub start_time: DateTime,

    /// Local wall-clock end of the visit
    pub end_time: DateTime,

    /// How the traveller arrives from the previous item
    pub travel_mode: TravelMode,

    /// Travel time from the previous item, in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ItineraryItem {
    /// Length of the visit.
    pub fn duration(&self) -> SignedDuration {
        self.end_time.duration_since(self.start_time)
    }

    /// Whether the item is a placeholder with neither place nor accommodation.
    pub fn is_placeholder(&self) -> bool {
        self.place_id.is_none() && self.accommodation_id.is_none()
    }
}
