//! Optimization requests, results and suggestion bookkeeping.
//!
//! The optimizer is an external, untrusted service. Its output is modelled
//! here in the flat wire shape it arrives in; numeric fields are signed so
//! that out-of-range values survive deserialization and are reported by the
//! applier's validation pass instead of failing the whole parse.

use std::{fmt, str::FromStr};

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::{valid_coordinates, Place, PlaceCategory, DEFAULT_VISIT_MINUTES};
use crate::hours::BusinessHours;

/// What an optimizer asks for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationMode {
    /// Reorder existing places only
    #[default]
    OptimizeOnly,
    /// Also propose new places
    SuggestAndOptimize,
}

impl FromStr for OptimizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimize-only" | "optimize" => Ok(OptimizationMode::OptimizeOnly),
            "suggest-and-optimize" | "suggest" => Ok(OptimizationMode::SuggestAndOptimize),
            _ => Err(format!("Invalid optimization mode: {s}")),
        }
    }
}

impl OptimizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationMode::OptimizeOnly => "optimize-only",
            OptimizationMode::SuggestAndOptimize => "suggest-and-optimize",
        }
    }
}

/// Optional constraints forwarded to the optimizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConstraints {
    /// Place ids whose relative order must be kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preserve_order: Vec<String>,
    /// Place ids that must stay in the itinerary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_visit: Vec<String>,
}

/// Request sent to the optimization service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub trip_id: String,
    pub mode: OptimizationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<OptimizationConstraints>,
}

/// Kind of edit a suggestion proposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Add,
    Remove,
    Reorder,
    Modify,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Add => "add",
            SuggestionKind::Remove => "remove",
            SuggestionKind::Reorder => "reorder",
            SuggestionKind::Modify => "modify",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A place proposed by the optimizer; every field may be missing.
///
/// Fields that need parsing stay raw so one bad value rejects only its own
/// suggestion. Any id the optimizer sends is ignored: accepted places always
/// get a fresh id, so a suggestion can never overwrite catalog data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPlace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<SuggestedHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Opening window of a suggested place, as sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

impl SuggestedPlace {
    /// Convenience constructor for a named place at a coordinate.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }

    pub fn with_hours(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.business_hours = Some(SuggestedHours {
            open: Some(open.into()),
            close: Some(close.into()),
        });
        self
    }

    /// Checks every field and builds the catalog place under `id`.
    /// Missing optional fields fall back to neutral defaults.
    pub fn to_place(&self, id: String) -> Result<Place, String> {
        let name = match self.name.as_deref().map(str::trim) {
            None | Some("") => return Err("new place has no name".to_string()),
            Some(name) => name.to_string(),
        };
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err("new place has no coordinates".to_string());
        };
        if !valid_coordinates(latitude, longitude) {
            return Err(format!(
                "new place coordinates ({latitude}, {longitude}) are out of range"
            ));
        }

        let category = self
            .category
            .as_deref()
            .map(str::parse::<PlaceCategory>)
            .transpose()?
            .unwrap_or_default();

        let business_hours = match &self.business_hours {
            None => None,
            Some(SuggestedHours {
                open: Some(open),
                close: Some(close),
            }) => Some(
                BusinessHours::parse(open, close)
                    .map_err(|e| format!("new place business hours are invalid: {e}"))?,
            ),
            Some(_) => {
                return Err("new place business hours need both open and close".to_string())
            }
        };

        let estimated_duration = match self.estimated_duration {
            None => DEFAULT_VISIT_MINUTES,
            Some(minutes) => u32::try_from(minutes)
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| format!("new place visit length {minutes} is not positive"))?,
        };

        if let Some(cost) = self.estimated_cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(format!("new place cost {cost} is not a valid amount"));
            }
        }

        Ok(Place {
            id,
            name,
            description: self.description.clone(),
            latitude,
            longitude,
            category,
            business_hours,
            estimated_duration,
            estimated_cost: self.estimated_cost,
            tags: self.tags.clone(),
        })
    }
}

/// One proposed edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_place: Option<SuggestedPlace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_start_time: Option<DateTime>,
    /// Why the optimizer proposes this edit
    pub reasoning: String,
}

impl OptimizationSuggestion {
    fn bare(kind: SuggestionKind, reasoning: impl Into<String>) -> Self {
        Self {
            kind,
            item_id: None,
            place_id: None,
            new_place: None,
            new_order: None,
            new_day: None,
            new_start_time: None,
            reasoning: reasoning.into(),
        }
    }

    /// Proposes adding a new place on a day.
    pub fn add(place: SuggestedPlace, day: i64, reasoning: impl Into<String>) -> Self {
        Self {
            new_place: Some(place),
            new_day: Some(day),
            ..Self::bare(SuggestionKind::Add, reasoning)
        }
    }

    /// Proposes removing an item.
    pub fn remove(item_id: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            ..Self::bare(SuggestionKind::Remove, reasoning)
        }
    }

    /// Proposes moving an item to a position within its day.
    pub fn reorder(item_id: impl Into<String>, new_order: i64, reasoning: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            new_order: Some(new_order),
            ..Self::bare(SuggestionKind::Reorder, reasoning)
        }
    }

    /// Proposes changing an item; combine with the `with_*` methods.
    pub fn modify(item_id: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            ..Self::bare(SuggestionKind::Modify, reasoning)
        }
    }

    pub fn with_start_time(mut self, start: DateTime) -> Self {
        self.new_start_time = Some(start);
        self
    }

    pub fn with_day(mut self, day: i64) -> Self {
        self.new_day = Some(day);
        self
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }
}

/// Full response of one optimize request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    #[serde(default)]
    pub suggestions: Vec<OptimizationSuggestion>,
    /// Overall explanation of the plan
    #[serde(default)]
    pub reasoning: String,
    /// Minutes saved, as estimated by the optimizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_saved: Option<u32>,
    /// Meters saved, as estimated by the optimizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_distance_saved: Option<u32>,
}

/// A suggestion that failed validation, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRejection {
    /// Position of the suggestion in the result (0-indexed)
    pub index: usize,
    pub kind: SuggestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub reason: String,
}

impl fmt::Display for SuggestionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index + 1, self.kind)?;
        if let Some(id) = &self.item_id {
            write!(f, " ({id})")?;
        }
        write!(f, ": {}", self.reason)
    }
}

/// What an applied optimization changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedSummary {
    pub added: usize,
    pub removed: usize,
    pub reordered: usize,
    pub modified: usize,
    /// Places created by `add` suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_places: Vec<Place>,
    /// Items created by `add` suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_item_ids: Vec<String>,
}

impl AppliedSummary {
    /// Total number of applied suggestions.
    pub fn total(&self) -> usize {
        self.added + self.removed + self.reordered + self.modified
    }
}
