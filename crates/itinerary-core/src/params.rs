//! Parameter structures for itinerary operations.
//!
//! These structures are shared between the [`crate::planner::Planner`] facade
//! and its front ends. They carry no framework derives beyond serde; each
//! interface defines its own argument types and converts into these:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Planner      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (async facade)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Parameters that need checking beyond their types expose a `validate`
//! method the planner calls before touching the database.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use crate::{
    drag::MoveDirection,
    error::{ItineraryError, Result},
    hours::BusinessHours,
    models::{
        valid_coordinates, ItemPatch, OptimizationConstraints, OptimizationMode, Place,
        PlaceCategory, TravelMode,
    },
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// Parameters for creating a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrip {
    pub name: String,
    pub country_id: Option<String>,
    /// First day of the trip
    pub start_date: Date,
    /// Last day of the trip, inclusive
    pub end_date: Date,
    #[serde(default)]
    pub preferred_transport: TravelMode,
}

impl CreateTrip {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ItineraryError::invalid_input("name").with_reason("Trip name is empty"));
        }
        if self.end_date < self.start_date {
            return Err(ItineraryError::invalid_input("end_date").with_reason(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

/// Parameters for changing a trip. Unset fields keep their value.
///
/// Moving the start date shifts every item's times by the same number of
/// days, so each stays on its day number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrip {
    pub id: String,
    pub name: Option<String>,
    pub country_id: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub preferred_transport: Option<TravelMode>,
}

impl UpdateTrip {
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ItineraryError::invalid_input("name").with_reason("Trip name is empty"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ItineraryError::invalid_input("end_date").with_reason(format!(
                    "End date {end} is before start date {start}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.country_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.preferred_transport.is_none()
    }
}

/// Parameters for adding a place to the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlace {
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub category: PlaceCategory,
    pub business_hours: Option<BusinessHours>,
    /// Typical visit length in minutes; defaults to 60
    pub estimated_duration: Option<u32>,
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreatePlace {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ItineraryError::invalid_input("name").with_reason("Place name is empty"));
        }
        if !valid_coordinates(self.latitude, self.longitude) {
            return Err(ItineraryError::invalid_input("coordinates").with_reason(format!(
                "({}, {}) is not a valid latitude/longitude pair",
                self.latitude, self.longitude
            )));
        }
        if self.estimated_duration == Some(0) {
            return Err(ItineraryError::invalid_input("estimated_duration")
                .with_reason("Visit length must be at least one minute"));
        }
        Ok(())
    }
}

/// Parameters for changing a catalog place. Unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlace {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category: Option<PlaceCategory>,
    pub business_hours: Option<BusinessHours>,
    /// Drop the place's business hours
    #[serde(default)]
    pub clear_hours: bool,
    pub estimated_duration: Option<u32>,
    pub estimated_cost: Option<f64>,
    /// Replaces every tag when set
    pub tags: Option<Vec<String>>,
}

impl UpdatePlace {
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ItineraryError::invalid_input("name").with_reason("Place name is empty"));
        }
        if self.clear_hours && self.business_hours.is_some() {
            return Err(ItineraryError::invalid_input("business_hours")
                .with_reason("Cannot set and clear business hours at once"));
        }
        if self.estimated_duration == Some(0) {
            return Err(ItineraryError::invalid_input("estimated_duration")
                .with_reason("Visit length must be at least one minute"));
        }
        if self
            .estimated_cost
            .is_some_and(|cost| !cost.is_finite() || cost < 0.0)
        {
            return Err(ItineraryError::invalid_input("estimated_cost")
                .with_reason("Cost must be a non-negative number"));
        }
        Ok(())
    }

    /// Returns a copy of `place` with the changes applied, and a line per
    /// changed field.
    pub fn applied_to(&self, place: &Place) -> Result<(Place, Vec<String>)> {
        let mut updated = place.clone();
        let mut changes = Vec::new();

        if let Some(name) = &self.name {
            updated.name = name.trim().to_string();
            changes.push(format!("Name: {}", updated.name));
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
            changes.push("Description updated".to_string());
        }
        if let Some(latitude) = self.latitude {
            updated.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            updated.longitude = longitude;
        }
        if self.latitude.is_some() || self.longitude.is_some() {
            if !valid_coordinates(updated.latitude, updated.longitude) {
                return Err(ItineraryError::invalid_input("coordinates").with_reason(format!(
                    "({}, {}) is not a valid latitude/longitude pair",
                    updated.latitude, updated.longitude
                )));
            }
            changes.push(format!(
                "Location: {:.5}, {:.5}",
                updated.latitude, updated.longitude
            ));
        }
        if let Some(category) = self.category {
            updated.category = category;
            changes.push(format!("Category: {}", category.as_str()));
        }
        if let Some(hours) = self.business_hours {
            updated.business_hours = Some(hours);
            changes.push(format!("Hours: {hours}"));
        }
        if self.clear_hours {
            updated.business_hours = None;
            changes.push("Hours cleared".to_string());
        }
        if let Some(minutes) = self.estimated_duration {
            updated.estimated_duration = minutes;
            changes.push(format!("Visit: {minutes} min"));
        }
        if let Some(cost) = self.estimated_cost {
            updated.estimated_cost = Some(cost);
            changes.push(format!("Cost: {cost:.2}"));
        }
        if let Some(tags) = &self.tags {
            updated.tags = tags.clone();
            changes.push(format!("Tags: {}", tags.join(", ")));
        }
        Ok((updated, changes))
    }
}

/// Parameters for adding an accommodation to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccommodation {
    pub trip_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub check_in: DateTime,
    pub check_out: DateTime,
}

impl CreateAccommodation {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(
                ItineraryError::invalid_input("name").with_reason("Accommodation name is empty")
            );
        }
        if !valid_coordinates(self.latitude, self.longitude) {
            return Err(ItineraryError::invalid_input("coordinates").with_reason(format!(
                "({}, {}) is not a valid latitude/longitude pair",
                self.latitude, self.longitude
            )));
        }
        if self.check_out <= self.check_in {
            return Err(ItineraryError::invalid_input("check_out").with_reason(format!(
                "Check-out {} is not after check-in {}",
                self.check_out, self.check_in
            )));
        }
        Ok(())
    }
}

/// Parameters naming one accommodation of a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripAccommodation {
    pub trip_id: String,
    pub accommodation_id: String,
}

/// Parameters for adding an item to a trip day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItem {
    pub trip_id: String,
    pub day_number: u32,
    pub place_id: Option<String>,
    pub accommodation_id: Option<String>,
    pub start_time: DateTime,
    /// Defaults to the start time plus the place's visit length
    pub end_time: Option<DateTime>,
    /// Defaults to the trip's preferred transport
    pub travel_mode: Option<TravelMode>,
    pub travel_duration: Option<u32>,
    pub notes: Option<String>,
    /// Insert at this position instead of appending
    pub position: Option<u32>,
}

/// Parameters for updating an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    pub trip_id: String,
    pub item_id: String,
    pub patch: ItemPatch,
}

/// Parameters naming one item of a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripItem {
    pub trip_id: String,
    pub item_id: String,
}

/// Parameters for moving an item to another day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveItem {
    pub trip_id: String,
    pub item_id: String,
    pub day_number: u32,
}

/// Parameters for moving an item one step within its day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeItem {
    pub trip_id: String,
    pub item_id: String,
    pub direction: MoveDirection,
}

/// Parameters naming one day of a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayQuery {
    pub trip_id: String,
    pub day_number: u32,
}

/// Parameters for replacing the order of a day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderDay {
    pub trip_id: String,
    pub day_number: u32,
    /// Every id of the day, in the new order
    pub item_ids: Vec<String>,
}

/// Parameters for an optimize request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Optimize {
    pub trip_id: String,
    #[serde(default)]
    pub mode: OptimizationMode,
    pub constraints: Option<OptimizationConstraints>,
    /// Validate and preview only
    #[serde(default)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_create_trip_validation() {
        let mut params = CreateTrip {
            name: "Seoul".to_string(),
            country_id: None,
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 1),
            preferred_transport: TravelMode::Transit,
        };
        assert!(params.validate().is_ok());

        params.end_date = date(2024, 4, 30);
        assert!(params.validate().is_err());

        params.end_date = date(2024, 5, 3);
        params.name = "   ".to_string();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_create_place_validation() {
        let mut params = CreatePlace {
            name: "Gyeongbokgung".to_string(),
            latitude: 37.5796,
            longitude: 126.977,
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        params.longitude = 181.0;
        assert!(params.validate().is_err());

        params.longitude = 126.977;
        params.estimated_duration = Some(0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_trip_validation() {
        let mut params = UpdateTrip {
            id: "seoul".to_string(),
            ..Default::default()
        };
        assert!(params.is_empty());
        assert!(params.validate().is_ok());

        params.start_date = Some(date(2024, 5, 4));
        params.end_date = Some(date(2024, 5, 3));
        assert!(params.validate().is_err());

        params.end_date = None;
        params.name = Some(" ".to_string());
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_update_place_applies_only_set_fields() {
        let place = Place {
            id: "market".to_string(),
            name: "Gwangjang Market".to_string(),
            description: None,
            latitude: 37.57,
            longitude: 126.99,
            category: PlaceCategory::Shopping,
            business_hours: Some(BusinessHours::parse("09:00", "23:00").expect("hours")),
            estimated_duration: 90,
            estimated_cost: None,
            tags: vec!["food".to_string()],
        };
        let params = UpdatePlace {
            id: "market".to_string(),
            clear_hours: true,
            estimated_duration: Some(60),
            ..Default::default()
        };
        params.validate().expect("Failed to validate place update");

        let (updated, changes) = params.applied_to(&place).expect("Failed to apply update");
        assert_eq!(updated.business_hours, None);
        assert_eq!(updated.estimated_duration, 60);
        assert_eq!(updated.name, place.name);
        assert_eq!(updated.tags, place.tags);
        assert_eq!(changes, vec!["Hours cleared".to_string(), "Visit: 60 min".to_string()]);

        let bad = UpdatePlace {
            id: "market".to_string(),
            latitude: Some(95.0),
            ..Default::default()
        };
        assert!(bad.applied_to(&place).is_err());
    }

    #[test]
    fn test_accommodation_needs_a_stay() {
        let mut params = CreateAccommodation {
            trip_id: "seoul".to_string(),
            name: "Bukchon Hanok".to_string(),
            latitude: 37.58,
            longitude: 126.98,
            check_in: date(2024, 5, 1).at(15, 0, 0, 0),
            check_out: date(2024, 5, 3).at(11, 0, 0, 0),
        };
        assert!(params.validate().is_ok());

        params.check_out = params.check_in;
        assert!(params.validate().is_err());

        params.check_out = date(2024, 5, 3).at(11, 0, 0, 0);
        params.latitude = -91.0;
        assert!(params.validate().is_err());
    }
}
