//! One open trip-planning session.
//!
//! A [`PlanningSession`] owns the trip's [`ItineraryStore`], the catalog of
//! places its items refer to, and the lifecycle of the asynchronous optimize
//! request:
//!
//! ```text
//!                 begin_optimization
//!   Idle ───────────────────────────▶ Pending(ticket)
//!    ▲                                   │
//!    │ apply / reject      resolve(ok)   │   resolve(err)
//!    │                  ┌────────────────┴──────────────┐
//!    │                  ▼                               ▼
//!    └───────────── Ready(result)               Unavailable(message)
//! ```
//!
//! Every request is tagged with a ticket. Starting a new request supersedes
//! the old one, and a response carrying a superseded ticket is discarded.

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    applier::{SuggestionApplier, ValidatedPlan},
    error::{ItineraryError, Result},
    hours::{classify_visit, BusinessHoursStatus},
    models::{
        Accommodation, AppliedSummary, ItineraryItem, OptimizationConstraints, OptimizationMode,
        OptimizationRequest, OptimizationResult, Place, Trip,
    },
    store::ItineraryStore,
};

/// External route optimization service.
#[async_trait]
pub trait Optimizer: Send + Sync {
    /// Produces suggestions for a trip. The output is untrusted.
    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResult>;
}

/// Identifies one optimize request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptimizationTicket(u64);

/// Where the session's optimize request stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OptimizationState {
    #[default]
    Idle,
    Pending {
        ticket: OptimizationTicket,
        request: OptimizationRequest,
    },
    Ready {
        result: OptimizationResult,
    },
    Unavailable {
        message: String,
    },
}

impl OptimizationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationState::Idle => "idle",
            OptimizationState::Pending { .. } => "pending",
            OptimizationState::Ready { .. } => "ready",
            OptimizationState::Unavailable { .. } => "unavailable",
        }
    }
}

/// An item of a day timeline with its place and visit status resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub item: ItineraryItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    /// `None` when the place has no business hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BusinessHoursStatus>,
}

/// Itinerary state of one trip being planned.
#[derive(Debug, Clone)]
pub struct PlanningSession {
    store: ItineraryStore,
    places: HashMap<String, Place>,
    new_places: Vec<Place>,
    accommodations: HashMap<String, Accommodation>,
    applier: SuggestionApplier,
    optimization: OptimizationState,
    last_ticket: u64,
}

impl PlanningSession {
    pub fn new(store: ItineraryStore, places: impl IntoIterator<Item = Place>) -> Self {
        Self {
            store,
            places: places
                .into_iter()
                .map(|place| (place.id.clone(), place))
                .collect(),
            new_places: Vec::new(),
            accommodations: HashMap::new(),
            applier: SuggestionApplier::new(),
            optimization: OptimizationState::Idle,
            last_ticket: 0,
        }
    }

    /// Attaches the trip's accommodations.
    pub fn with_accommodations(
        mut self,
        accommodations: impl IntoIterator<Item = Accommodation>,
    ) -> Self {
        self.accommodations = accommodations
            .into_iter()
            .map(|stay| (stay.id.clone(), stay))
            .collect();
        self
    }

    /// Replaces the applier, e.g. to change the default day start.
    pub fn with_applier(mut self, applier: SuggestionApplier) -> Self {
        self.applier = applier;
        self
    }

    pub fn trip(&self) -> &Trip {
        self.store.trip()
    }

    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ItineraryStore {
        &mut self.store
    }

    pub fn day_items(&self, day: u32) -> Vec<ItineraryItem> {
        self.store.get_day_items(day)
    }

    pub fn get_item(&self, id: &str) -> Option<&ItineraryItem> {
        self.store.get_item(id)
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.get(id)
    }

    pub fn accommodation(&self, id: &str) -> Option<&Accommodation> {
        self.accommodations.get(id)
    }

    /// Catalog places sorted by name.
    pub fn places(&self) -> Vec<&Place> {
        let mut places: Vec<&Place> = self.places.values().collect();
        places.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        places
    }

    /// Adds a place to the catalog and marks it for saving.
    pub fn add_place(&mut self, place: Place) {
        self.new_places.push(place.clone());
        self.places.insert(place.id.clone(), place);
    }

    /// Drains places added since the last save.
    pub fn take_new_places(&mut self) -> Vec<Place> {
        std::mem::take(&mut self.new_places)
    }

    /// Business-hours badge of an item's visit, if its place has hours.
    pub fn item_status(&self, id: &str) -> Option<BusinessHoursStatus> {
        let item = self.store.get_item(id)?;
        self.status_of(item)
    }

    /// Items of a day with their places and badges.
    pub fn timeline(&self, day: u32) -> Vec<TimelineEntry> {
        self.store
            .get_day_items(day)
            .into_iter()
            .map(|item| TimelineEntry {
                place: item.place_id.as_deref().and_then(|id| self.place(id)).cloned(),
                accommodation: item
                    .accommodation_id
                    .as_deref()
                    .and_then(|id| self.accommodation(id))
                    .cloned(),
                status: self.status_of(&item),
                item,
            })
            .collect()
    }

    pub fn optimization(&self) -> &OptimizationState {
        &self.optimization
    }

    /// Starts a new optimize request, superseding any pending one.
    pub fn begin_optimization(
        &mut self,
        mode: OptimizationMode,
        constraints: Option<OptimizationConstraints>,
    ) -> (OptimizationTicket, OptimizationRequest) {
        self.last_ticket += 1;
        let ticket = OptimizationTicket(self.last_ticket);
        let request = OptimizationRequest {
            trip_id: self.store.trip().id.clone(),
            mode,
            constraints,
        };
        if matches!(self.optimization, OptimizationState::Pending { .. }) {
            debug!("Superseding pending optimization with ticket {}", ticket.0);
        }
        self.optimization = OptimizationState::Pending {
            ticket,
            request: request.clone(),
        };
        (ticket, request)
    }

    /// Records the optimizer's answer for a ticket.
    ///
    /// Returns `false` and leaves the state alone when the ticket is no longer
    /// the pending one.
    pub fn resolve_optimization(
        &mut self,
        ticket: OptimizationTicket,
        outcome: Result<OptimizationResult>,
    ) -> bool {
        match &self.optimization {
            OptimizationState::Pending { ticket: pending, .. } if *pending == ticket => {}
            _ => {
                debug!("Discarding response for stale optimization ticket {}", ticket.0);
                return false;
            }
        }

        self.optimization = match outcome {
            Ok(result) => {
                info!(
                    "Optimization returned {} suggestion(s)",
                    result.suggestions.len()
                );
                OptimizationState::Ready { result }
            }
            Err(err) => {
                warn!("Optimization failed: {err}");
                let message = match err {
                    ItineraryError::OptimizationUnavailable { message } => message,
                    other => other.to_string(),
                };
                OptimizationState::Unavailable { message }
            }
        };
        true
    }

    /// Drops a pending request; its response will be discarded.
    pub fn abandon_optimization(&mut self) {
        if matches!(self.optimization, OptimizationState::Pending { .. }) {
            self.optimization = OptimizationState::Idle;
        }
    }

    /// Runs a full optimize round trip against an optimizer.
    pub async fn optimize(
        &mut self,
        optimizer: &dyn Optimizer,
        mode: OptimizationMode,
        constraints: Option<OptimizationConstraints>,
    ) -> Result<&OptimizationResult> {
        let (ticket, request) = self.begin_optimization(mode, constraints);
        let outcome = optimizer.optimize(&request).await;
        self.resolve_optimization(ticket, outcome);

        match &self.optimization {
            OptimizationState::Ready { result } => Ok(result),
            OptimizationState::Unavailable { message } => {
                Err(ItineraryError::OptimizationUnavailable {
                    message: message.clone(),
                })
            }
            _ => Err(ItineraryError::OptimizationUnavailable {
                message: "optimization was superseded".to_string(),
            }),
        }
    }

    /// The result awaiting a decision, if any.
    pub fn pending_result(&self) -> Option<&OptimizationResult> {
        match &self.optimization {
            OptimizationState::Ready { result } => Some(result),
            _ => None,
        }
    }

    /// Validates the ready result without applying it.
    pub fn preview(&self) -> Result<ValidatedPlan> {
        let result = self.ready_result()?;
        self.applier.validate(result, &self.store)
    }

    /// Applies the ready result. New places join the catalog.
    ///
    /// On failure the result stays ready so it can be inspected or rejected.
    pub fn apply_suggestions(&mut self) -> Result<AppliedSummary> {
        let result = match &self.optimization {
            OptimizationState::Ready { result } => result,
            _ => return Err(no_result()),
        };
        let summary = self.applier.apply(result, &mut self.store)?;

        for place in &summary.new_places {
            self.add_place(place.clone());
        }
        self.optimization = OptimizationState::Idle;
        Ok(summary)
    }

    /// Discards the ready result. Returns whether there was one.
    pub fn reject_suggestions(&mut self) -> bool {
        if matches!(self.optimization, OptimizationState::Ready { .. }) {
            self.optimization = OptimizationState::Idle;
            true
        } else {
            false
        }
    }

    fn ready_result(&self) -> Result<&OptimizationResult> {
        self.pending_result().ok_or_else(no_result)
    }

    fn status_of(&self, item: &ItineraryItem) -> Option<BusinessHoursStatus> {
        let place = self.place(item.place_id.as_deref()?)?;
        let hours = place.business_hours.as_ref()?;
        Some(classify_visit(item.start_time, hours))
    }
}

fn no_result() -> ItineraryError {
    ItineraryError::invalid_input("optimization").with_reason("no suggestions are ready")
}
