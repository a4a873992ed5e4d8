//! Data models for trips, places and itinerary items.
//!
//! This module contains the core domain models of the itinerary engine.
//! Display implementations for these models live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! All models serialize with camelCase field names, matching the JSON the
//! CRUD service and the optimization service exchange.
//!
//! ## Model Overview
//!
//! - [`Trip`]: date range and preferred transport; day numbers are offsets
//!   from its start date
//! - [`Place`]: immutable reference data, optionally with business hours
//! - [`Accommodation`]: a stay that belongs to one trip
//! - [`ItineraryItem`]: one visit anchored to a day and an order position
//! - [`NewItem`] / [`ItemPatch`]: creation and update requests
//! - [`OptimizationResult`]: untrusted optimizer output, validated by
//!   [`crate::applier::SuggestionApplier`]
//! - [`ItineraryChange`]: journal entry emitted after each committed mutation
//!
//! # Examples
//!
//! ```rust
//! use itinerary_core::models::{ItemPatch, ItineraryItem, TravelMode};
//! use jiff::civil::date;
//!
//! let item = ItineraryItem {
//!     id: "gyeongbokgung".to_string(),
//!     trip_id: "seoul".to_string(),
//!     day_number: 1,
//!     order: 0,
//!     place_id: Some("palace".to_string()),
//!     accommodation_id: None,
//!     start_time: date(2024, 5, 1).at(9, 0, 0, 0),
//!     end_time: date(2024, 5, 1).at(11, 0, 0, 0),
//!     travel_mode: TravelMode::Transit,
//!     travel_duration: None,
//!     notes: None,
//! };
//!
//! let patch = ItemPatch {
//!     notes: Some("Buy tickets online".to_string()),
//!     ..Default::default()
//! };
//! let updated = patch.applied_to(&item);
//! assert_eq!(updated.notes.as_deref(), Some("Buy tickets online"));
//! assert_eq!(updated.order, item.order);
//! ```

pub mod accommodation;
pub mod change;
pub mod item;
pub mod place;
pub mod requests;
pub mod status;
pub mod suggestion;
pub mod trip;

#[cfg(test)]
mod tests;

pub use accommodation::Accommodation;
pub use change::ItineraryChange;
pub use item::ItineraryItem;
pub use place::{valid_coordinates, Place, DEFAULT_VISIT_MINUTES};
pub use requests::{ItemPatch, NewItem};
pub use status::{PlaceCategory, TravelMode};
pub use suggestion::{
    AppliedSummary, OptimizationConstraints, OptimizationMode, OptimizationRequest,
    OptimizationResult, OptimizationSuggestion, SuggestedHours, SuggestedPlace, SuggestionKind,
    SuggestionRejection,
};
pub use trip::Trip;
