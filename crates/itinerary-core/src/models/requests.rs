//! Request types for creating and updating itinerary items.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{ItineraryItem, TravelMode};

/// Everything needed to create an itinerary item.
///
/// `order` is optional: when absent the store appends the item to the end of
/// its day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub id: String,
    pub trip_id: String,
    pub day_number: u32,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub accommodation_id: Option<String>,
    pub start_time: DateTime,
    pub end_time: DateTime,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub travel_duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewItem {
    /// Turns the request into an item at the given position.
    pub(crate) fn into_item(self, order: u32) -> ItineraryItem {
        ItineraryItem {
            id: self.id,
            trip_id: self.trip_id,
            day_number: self.day_number,
            order,
            place_id: self.place_id,
            accommodation_id: self.accommodation_id,
            start_time: self.start_time,
            end_time: self.end_time,
            travel_mode: self.travel_mode,
            travel_duration: self.travel_duration,
            notes: self.notes,
        }
    }
}

/// Partial update of an itinerary item.
///
/// The patch has no `order` or `day_number` field: positions change
/// through `reorder_day` and `move_item` only. Setting `place_id` clears any
/// accommodation and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub accommodation_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime>,
    #[serde(default)]
    pub end_time: Option<DateTime>,
    #[serde(default)]
    pub travel_mode: Option<TravelMode>,
    #[serde(default)]
    pub travel_duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ItemPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none()
            && self.accommodation_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.travel_mode.is_none()
            && self.travel_duration.is_none()
            && self.notes.is_none()
    }

    /// Returns a copy of `item` with the patch applied. The result is not
    /// validated.
    pub fn applied_to(&self, item: &ItineraryItem) -> ItineraryItem {
        let mut updated = item.clone();
        match (&self.place_id, &self.accommodation_id) {
            (Some(place), None) => {
                updated.place_id = Some(place.clone());
                updated.accommodation_id = None;
            }
            (None, Some(accommodation)) => {
                updated.place_id = None;
                updated.accommodation_id = Some(accommodation.clone());
            }
            (Some(place), Some(accommodation)) => {
                updated.place_id = Some(place.clone());
                updated.accommodation_id = Some(accommodation.clone());
            }
            (None, None) => {}
        }
        if let Some(start) = self.start_time {
            updated.start_time = start;
        }
        if let Some(end) = self.end_time {
            updated.end_time = end;
        }
        if let Some(mode) = self.travel_mode {
            updated.travel_mode = mode;
        }
        if let Some(minutes) = self.travel_duration {
            updated.travel_duration = Some(minutes);
        }
        if let Some(notes) = &self.notes {
            updated.notes = Some(notes.clone());
        }
        updated
    }
}
