//! Place reference data.

use serde::{Deserialize, Serialize};

use super::PlaceCategory;
use crate::hours::BusinessHours;

/// Default visit length when a place does not say how long it takes.
pub const DEFAULT_VISIT_MINUTES: u32 = 60;

/// A point of interest that itinerary items can visit.
///
/// Places are immutable reference data from the engine's point of view; only
/// [`Place::business_hours`] and [`Place::estimated_duration`] feed back into
/// scheduling decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique identifier for the place
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub latitude: f64,
    pub longitude: f64,

    #[serde(default)]
    pub category: PlaceCategory,

    /// Daily opening window, if the place has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<BusinessHours>,

    /// Typical visit length in minutes
    #[serde(default = "default_visit_minutes")]
    pub estimated_duration: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_visit_minutes() -> u32 {
    DEFAULT_VISIT_MINUTES
}

/// Whether a coordinate pair lies on the globe.
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}
