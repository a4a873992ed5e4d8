//! Core library for the itinerary scheduling engine.
//!
//! This crate keeps the day-by-day itinerary of a trip consistent while it is
//! edited by hand (drag and drop or keyboard moves) and by an external
//! optimizer. It provides:
//!
//! - [`ItineraryStore`]: the canonical ordered items of one trip, with
//!   invariant checks and a change journal
//! - [`classify`]: the business-hours badge of a visit
//! - [`DragReorderController`]: a framework-independent reorder state machine
//! - [`SuggestionApplier`]: all-or-nothing application of optimizer output
//! - [`Accommodation`]: where the travellers sleep, referenced by items
//! - [`PlanningSession`]: one open planning session and its optimize lifecycle
//! - [`Database`] and [`Planner`]: SQLite persistence behind an async facade
//!
//! Domain models implement [`std::fmt::Display`] as markdown; the
//! [`display`] module adds wrappers for timelines and operation results.
//!
//! # Quick Start
//!
//! ```rust
//! use itinerary_core::{
//!     models::{NewItem, TravelMode, Trip},
//!     ItineraryStore,
//! };
//! use jiff::civil::date;
//!
//! let trip = Trip {
//!     id: "seoul".to_string(),
//!     name: "Seoul".to_string(),
//!     country_id: Some("KR".to_string()),
//!     start_date: date(2024, 5, 1),
//!     end_date: date(2024, 5, 3),
//!     preferred_transport: TravelMode::Transit,
//! };
//! let mut store = ItineraryStore::new(trip);
//!
//! for (id, hour) in [("palace", 9), ("market", 12)] {
//!     store
//!         .add_item(NewItem {
//!             id: id.to_string(),
//!             trip_id: "seoul".to_string(),
//!             day_number: 1,
//!             order: None,
//!             place_id: None,
//!             accommodation_id: None,
//!             start_time: date(2024, 5, 1).at(hour, 0, 0, 0),
//!             end_time: date(2024, 5, 1).at(hour + 1, 0, 0, 0),
//!             travel_mode: TravelMode::Walking,
//!             travel_duration: None,
//!             notes: None,
//!         })
//!         .unwrap();
//! }
//!
//! store.reorder_day(1, &["market", "palace"]).unwrap();
//! assert_eq!(store.day_ids(1), vec!["market", "palace"]);
//! ```

pub mod applier;
pub mod db;
pub mod display;
pub mod drag;
pub mod error;
pub mod hours;
pub mod models;
pub mod params;
pub mod planner;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use applier::{PlannedEdit, SuggestionApplier, ValidatedPlan};
pub use db::Database;
pub use display::{
    Accommodations, AppliedPlan, CreateResult, DayTimeline, DeleteResult, DryRun, Places,
    Rejections, SuggestionPreview, TripItinerary, Trips, UpdateResult, VisitWindow,
};
pub use drag::{DragPhase, DragReorderController, KeyCommand, MoveDirection};
pub use error::{ItineraryError, Result};
pub use hours::{classify, classify_visit, BusinessHours, BusinessHoursStatus, ClockTime};
pub use models::{
    Accommodation, AppliedSummary, ItemPatch, ItineraryChange, ItineraryItem, NewItem,
    OptimizationResult, OptimizationSuggestion, Place, PlaceCategory, SuggestionRejection,
    TravelMode, Trip,
};
pub use planner::{OptimizeOutcome, Planner, PlannerBuilder};
pub use session::{OptimizationState, OptimizationTicket, Optimizer, PlanningSession, TimelineEntry};
pub use store::ItineraryStore;
