//! Display formatting wrappers for itinerary output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections, day timelines and
//! operation results. Every formatter produces markdown, which the CLI renders
//! for the terminal.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Formatted     │
//! │ (Trip, Place,   │───▶│ (DayTimeline,   │───▶│    Output       │
//! │  ItineraryItem) │    │  AppliedPlan)   │    │  (markdown)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: trip, place and accommodation lists, day timelines, whole itineraries
//! - [`results`]: create/update/delete results and optimization outcomes
//! - [`datetime`]: time-of-day formatting for visits
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use itinerary_core::display::DryRun;
//! use itinerary_core::OptimizationResult;
//!
//! let result = OptimizationResult::default();
//! let preview = DryRun { result: &result, edits: 0 };
//! assert!(preview.to_string().contains("0 edit(s) would be applied"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Accommodations, DayTimeline, Places, TripItinerary, Trips};
pub use datetime::VisitWindow;
pub use results::{
    AppliedPlan, CreateResult, DeleteResult, DryRun, Rejections, SuggestionPreview,
    UpdateResult,
};
