//! Item and day operations for the Planner.
//!
//! Every operation here runs against a freshly loaded [`PlanningSession`]
//! and persists the store's change journal when it succeeds.

use jiff::SignedDuration;
use log::debug;
use uuid::Uuid;

use super::{
    trip_ops::{check_day, day_timeline},
    Planner,
};
use crate::{
    display::{DayTimeline, UpdateResult},
    drag::DragReorderController,
    error::{ItineraryError, Result},
    models::{ItemPatch, ItineraryItem, NewItem, Place, DEFAULT_VISIT_MINUTES},
    params::{AddItem, DayQuery, MoveItem, NudgeItem, ReorderDay, TripItem, UpdateItem},
    session::PlanningSession,
};

impl Planner {
    /// Adds an item to a trip day.
    ///
    /// The end time defaults to the start time plus the place's visit length
    /// and the travel mode to the trip's preferred transport. With a
    /// `position` the item is inserted there, otherwise appended.
    pub async fn add_item(&self, params: &AddItem) -> Result<ItineraryItem> {
        let params = params.clone();
        let trip_id = params.trip_id.clone();

        self.edit_session(&trip_id, move |session| {
            check_day(session.trip(), params.day_number)?;
            if let Some(accommodation_id) = params.accommodation_id.as_deref() {
                known_accommodation(session, accommodation_id)?;
            }
            let visit_minutes = match params.place_id.as_deref() {
                Some(place_id) => known_place(session, place_id)?.estimated_duration,
                None => DEFAULT_VISIT_MINUTES,
            };
            let end_time = match params.end_time {
                Some(end) => end,
                None => params
                    .start_time
                    .checked_add(SignedDuration::from_mins(i64::from(visit_minutes)))
                    .map_err(|e| {
                        ItineraryError::invalid_input("start_time")
                            .with_reason(format!("cannot compute end time: {e}"))
                    })?,
            };

            let new = NewItem {
                id: Uuid::new_v4().to_string(),
                trip_id: session.trip().id.clone(),
                day_number: params.day_number,
                order: None,
                place_id: params.place_id,
                accommodation_id: params.accommodation_id,
                start_time: params.start_time,
                end_time,
                travel_mode: params
                    .travel_mode
                    .unwrap_or(session.trip().preferred_transport),
                travel_duration: params.travel_duration,
                notes: params.notes,
            };
            match params.position {
                Some(position) => session.store_mut().insert_item(new, position),
                None => session.store_mut().add_item(new),
            }
        })
        .await
    }

    /// Applies a partial update to an item.
    pub async fn update_item(&self, params: &UpdateItem) -> Result<UpdateResult<ItineraryItem>> {
        let params = params.clone();
        let trip_id = params.trip_id.clone();

        self.edit_session(&trip_id, move |session| {
            if let Some(place_id) = params.patch.place_id.as_deref() {
                known_place(session, place_id)?;
            }
            if let Some(accommodation_id) = params.patch.accommodation_id.as_deref() {
                known_accommodation(session, accommodation_id)?;
            }
            let item = session.store_mut().update_item(&params.item_id, &params.patch)?;
            Ok(UpdateResult::with_changes(item, describe_patch(&params.patch)))
        })
        .await
    }

    /// Removes an item; the rest of its day closes the gap.
    pub async fn remove_item(&self, params: &TripItem) -> Result<ItineraryItem> {
        let item_id = params.item_id.clone();

        self.edit_session(&params.trip_id, move |session| {
            session.store_mut().remove_item(&item_id)
        })
        .await
    }

    /// Moves an item to the end of another day of the trip.
    pub async fn move_item(&self, params: &MoveItem) -> Result<ItineraryItem> {
        let item_id = params.item_id.clone();
        let day = params.day_number;

        self.edit_session(&params.trip_id, move |session| {
            check_day(session.trip(), day)?;
            session.store_mut().move_item(&item_id, day)
        })
        .await
    }

    /// Moves an item one step up or down within its day.
    ///
    /// Returns the day afterwards; an item already at the edge stays put.
    pub async fn nudge_item(&self, params: &NudgeItem) -> Result<DayTimeline> {
        let item_id = params.item_id.clone();
        let direction = params.direction;

        self.edit_session(&params.trip_id, move |session| {
            let day = session
                .get_item(&item_id)
                .map(|item| item.day_number)
                .ok_or_else(|| ItineraryError::not_found(item_id.as_str()))?;

            let mut controller = DragReorderController::new(session.store(), day);
            let moved = controller.nudge(session.store_mut(), &item_id, direction)?;
            if !moved {
                debug!("Item {item_id} is already at the {direction:?} edge of day {day}");
            }
            Ok(day_timeline(session, day))
        })
        .await
    }

    /// Replaces the order of a day. The ids must be exactly the day's items.
    pub async fn reorder_day(&self, params: &ReorderDay) -> Result<DayTimeline> {
        let day = params.day_number;
        let item_ids = params.item_ids.clone();

        self.edit_session(&params.trip_id, move |session| {
            let mut controller = DragReorderController::new(session.store(), day);
            controller.commit(session.store_mut(), &item_ids)?;
            Ok(day_timeline(session, day))
        })
        .await
    }

    /// Shows one day of a trip.
    pub async fn day_timeline(&self, params: &DayQuery) -> Result<DayTimeline> {
        if params.day_number < 1 {
            return Err(ItineraryError::invalid_input("day_number")
                .with_reason("day numbers start at 1"));
        }
        let session = self.open_session(&params.trip_id).await?;
        Ok(day_timeline(&session, params.day_number))
    }
}

/// Looks up a catalog place an item is about to reference.
fn known_place<'a>(session: &'a PlanningSession, place_id: &str) -> Result<&'a Place> {
    session.place(place_id).ok_or_else(|| {
        ItineraryError::invalid_input("place_id")
            .with_reason(format!("place '{place_id}' is not in the catalog"))
    })
}

/// Looks up one of the trip's accommodations an item is about to reference.
fn known_accommodation(session: &PlanningSession, accommodation_id: &str) -> Result<()> {
    match session.accommodation(accommodation_id) {
        Some(_) => Ok(()),
        None => Err(ItineraryError::invalid_input("accommodation_id").with_reason(format!(
            "accommodation '{accommodation_id}' does not belong to trip '{}'",
            session.trip().name
        ))),
    }
}

/// Human-readable list of the fields a patch sets.
fn describe_patch(patch: &ItemPatch) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(place_id) = &patch.place_id {
        changes.push(format!("Place: {place_id}"));
    }
    if let Some(accommodation_id) = &patch.accommodation_id {
        changes.push(format!("Accommodation: {accommodation_id}"));
    }
    if let Some(start) = patch.start_time {
        changes.push(format!("Start: {}", start.strftime("%Y-%m-%d %H:%M")));
    }
    if let Some(end) = patch.end_time {
        changes.push(format!("End: {}", end.strftime("%Y-%m-%d %H:%M")));
    }
    if let Some(mode) = patch.travel_mode {
        changes.push(format!("Travel mode: {mode}"));
    }
    if let Some(minutes) = patch.travel_duration {
        changes.push(format!("Travel time: {minutes} min"));
    }
    if patch.notes.is_some() {
        changes.push("Notes updated".to_string());
    }
    changes
}
