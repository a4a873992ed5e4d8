//! Enumerations shared by trips, places and itinerary items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the traveller gets to an itinerary item from the previous one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// On foot
    #[default]
    Walking,

    /// By car or taxi
    Driving,

    /// Public transport
    Transit,

    /// By bicycle
    Cycling,
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walking" | "walk" => Ok(TravelMode::Walking),
            "driving" | "drive" => Ok(TravelMode::Driving),
            "transit" => Ok(TravelMode::Transit),
            "cycling" | "bike" => Ok(TravelMode::Cycling),
            _ => Err(format!("Invalid travel mode: {s}")),
        }
    }
}

impl TravelMode {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Cycling => "cycling",
        }
    }
}

/// Category of a place, used for grouping and display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Restaurant,
    Museum,
    Attraction,
    Shopping,
    Nature,
    Accommodation,
    Transport,
    #[default]
    Other,
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restaurant" => Ok(PlaceCategory::Restaurant),
            "museum" => Ok(PlaceCategory::Museum),
            "attraction" => Ok(PlaceCategory::Attraction),
            "shopping" => Ok(PlaceCategory::Shopping),
            "nature" => Ok(PlaceCategory::Nature),
            "accommodation" => Ok(PlaceCategory::Accommodation),
            "transport" => Ok(PlaceCategory::Transport),
            "other" => Ok(PlaceCategory::Other),
            _ => Err(format!("Invalid place category: {s}")),
        }
    }
}

impl PlaceCategory {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Museum => "museum",
            PlaceCategory::Attraction => "attraction",
            PlaceCategory::Shopping => "shopping",
            PlaceCategory::Nature => "nature",
            PlaceCategory::Accommodation => "accommodation",
            PlaceCategory::Transport => "transport",
            PlaceCategory::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_mode_round_trips_through_str() {
        for mode in [
            TravelMode::Walking,
            TravelMode::Driving,
            TravelMode::Transit,
            TravelMode::Cycling,
        ] {
            assert_eq!(mode.as_str().parse::<TravelMode>(), Ok(mode));
        }
        assert!("teleport".parse::<TravelMode>().is_err());
    }

    #[test]
    fn test_category_accepts_mixed_case() {
        assert_eq!("Museum".parse::<PlaceCategory>(), Ok(PlaceCategory::Museum));
        assert_eq!(PlaceCategory::default(), PlaceCategory::Other);
    }

    #[test]
    fn test_travel_mode_serializes_lowercase() {
        let json = serde_json::to_string(&TravelMode::Transit).expect("serialize");
        assert_eq!(json, "\"transit\"");
    }
}
