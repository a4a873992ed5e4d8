//! Atomic application of optimizer suggestions.
//!
//! Applying an [`OptimizationResult`] happens in two phases:
//!
//! ```text
//!  OptimizationResult ──validate──▶ ValidatedPlan ──commit──▶ ItineraryStore
//!          │                                          │
//!          └── any rejection: Validation error        └── staged copy swapped in
//!              (store untouched)                          only if every step and
//!                                                         the invariant check pass
//! ```
//!
//! Validation checks every suggestion against the current store snapshot and
//! collects all rejections rather than stopping at the first. The commit
//! applies removes, then modifies, then reorders (one `reorder_day` per
//! affected day), then adds, using only the store's public operations.

use std::collections::{BTreeMap, HashMap};

use jiff::{
    civil::{self, DateTime},
    SignedDuration,
};
use log::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ItineraryError, Result},
    models::{
        AppliedSummary, ItemPatch, ItineraryItem, NewItem, OptimizationResult, OptimizationSuggestion,
        Place, SuggestionKind, SuggestionRejection,
    },
    store::ItineraryStore,
};

/// Start of the day for added items when nothing else is scheduled.
pub const DEFAULT_DAY_START: civil::Time = civil::time(9, 0, 0, 0);

/// A suggestion that passed validation, in typed form.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedEdit {
    /// `place` already carries the fresh id it will be saved under
    Add {
        place: Place,
        day: u32,
        start_time: Option<DateTime>,
    },
    Remove {
        item_id: String,
    },
    Reorder {
        item_id: String,
        position: u32,
    },
    Modify {
        item_id: String,
        day: Option<u32>,
        start_time: Option<DateTime>,
        place_id: Option<String>,
    },
}

/// Every suggestion of a result, validated and ready to commit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedPlan {
    edits: Vec<PlannedEdit>,
}

impl ValidatedPlan {
    /// Edits in suggestion order.
    pub fn edits(&self) -> &[PlannedEdit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Validates and applies optimization results to a store.
#[derive(Debug, Clone)]
pub struct SuggestionApplier {
    day_start: civil::Time,
}

impl Default for SuggestionApplier {
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START,
        }
    }
}

impl SuggestionApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time added items start at on a day with no other items.
    pub fn with_day_start(mut self, day_start: civil::Time) -> Self {
        self.day_start = day_start;
        self
    }

    /// Validates and applies a result. Either every suggestion is applied or
    /// the store is left untouched.
    pub fn apply(
        &self,
        result: &OptimizationResult,
        store: &mut ItineraryStore,
    ) -> Result<AppliedSummary> {
        let plan = self.validate(result, store)?;
        self.commit(&plan, store)
    }

    /// Checks every suggestion against the store without changing it.
    ///
    /// Returns [`ItineraryError::Validation`] listing each rejected
    /// suggestion, ordered by position in the result.
    pub fn validate(
        &self,
        result: &OptimizationResult,
        store: &ItineraryStore,
    ) -> Result<ValidatedPlan> {
        let suggestions = &result.suggestions;

        // First remove of each existing item, by id.
        let mut removals: HashMap<&str, usize> = HashMap::new();
        for (index, suggestion) in suggestions.iter().enumerate() {
            if suggestion.kind == SuggestionKind::Remove {
                if let Some(id) = suggestion.item_id.as_deref() {
                    if store.contains(id) {
                        removals.entry(id).or_insert(index);
                    }
                }
            }
        }

        let mut checked: Vec<std::result::Result<PlannedEdit, String>> = suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| check_suggestion(index, suggestion, store, &removals))
            .collect();

        // Day sizes once removes and cross-day modifies have run; reorders
        // are applied against these.
        let mut projected: BTreeMap<u32, usize> = store
            .day_numbers()
            .into_iter()
            .map(|day| (day, store.day_len(day)))
            .collect();
        let mut current_day: HashMap<&str, u32> = HashMap::new();
        for edit in checked.iter().flatten() {
            match edit {
                PlannedEdit::Remove { item_id } => {
                    if let Some(item) = store.get_item(item_id) {
                        decrement(&mut projected, item.day_number);
                    }
                }
                PlannedEdit::Modify {
                    item_id,
                    day: Some(day),
                    ..
                } => {
                    let Some(item) = store.get_item(item_id) else {
                        continue;
                    };
                    let from = current_day
                        .get(item.id.as_str())
                        .copied()
                        .unwrap_or(item.day_number);
                    if from != *day {
                        decrement(&mut projected, from);
                        *projected.entry(*day).or_default() += 1;
                        current_day.insert(item.id.as_str(), *day);
                    }
                }
                _ => {}
            }
        }
        for entry in checked.iter_mut() {
            let Ok(PlannedEdit::Reorder { item_id, position }) = &*entry else {
                continue;
            };
            let day = current_day
                .get(item_id.as_str())
                .copied()
                .or_else(|| store.get_item(item_id).map(|item| item.day_number))
                .unwrap_or_default();
            let size = projected.get(&day).copied().unwrap_or_default();
            if *position as usize >= size {
                let reason = format!(
                    "position {position} is out of range; day {day} will have {size} item(s)"
                );
                *entry = Err(reason);
            }
        }

        let mut edits = Vec::with_capacity(checked.len());
        let mut rejections = Vec::new();
        for (index, entry) in checked.into_iter().enumerate() {
            match entry {
                Ok(edit) => edits.push(edit),
                Err(reason) => {
                    let suggestion = &suggestions[index];
                    rejections.push(SuggestionRejection {
                        index,
                        kind: suggestion.kind,
                        item_id: suggestion.item_id.clone(),
                        reason,
                    });
                }
            }
        }

        if !rejections.is_empty() {
            warn!(
                "Rejected {} of {} suggestion(s)",
                rejections.len(),
                suggestions.len()
            );
            return Err(ItineraryError::Validation { rejections });
        }
        Ok(ValidatedPlan { edits })
    }

    /// Commits a validated plan against a staged copy of the store and swaps
    /// it in on success.
    pub fn commit(&self, plan: &ValidatedPlan, store: &mut ItineraryStore) -> Result<AppliedSummary> {
        let mut staged = store.clone();
        let summary = self.commit_staged(plan, &mut staged).map_err(|e| {
            warn!("Discarding staged plan: {e}");
            ItineraryError::Internal {
                message: format!("failed to apply validated suggestions: {e}"),
            }
        })?;

        *store = staged;
        info!(
            "Applied {} suggestion(s): {} added, {} removed, {} reordered, {} modified",
            summary.total(),
            summary.added,
            summary.removed,
            summary.reordered,
            summary.modified
        );
        Ok(summary)
    }

    fn commit_staged(&self, plan: &ValidatedPlan, staged: &mut ItineraryStore) -> Result<AppliedSummary> {
        let mut summary = AppliedSummary::default();

        for edit in plan.edits() {
            if let PlannedEdit::Remove { item_id } = edit {
                staged.remove_item(item_id)?;
                summary.removed += 1;
            }
        }

        for edit in plan.edits() {
            if let PlannedEdit::Modify {
                item_id,
                day,
                start_time,
                place_id,
            } = edit
            {
                if let Some(day) = day {
                    staged.move_item(item_id, *day)?;
                }
                let mut patch = ItemPatch {
                    place_id: place_id.clone(),
                    ..Default::default()
                };
                if let Some(start) = start_time {
                    let current = staged
                        .get_item(item_id)
                        .ok_or_else(|| ItineraryError::not_found(item_id.as_str()))?;
                    patch.start_time = Some(*start);
                    patch.end_time = Some(shift_end(*start, current.duration())?);
                }
                staged.update_item(item_id, &patch)?;
                summary.modified += 1;
            }
        }

        let mut day_orders: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for edit in plan.edits() {
            if let PlannedEdit::Reorder { item_id, position } = edit {
                let day = staged
                    .get_item(item_id)
                    .map(|item| item.day_number)
                    .ok_or_else(|| ItineraryError::not_found(item_id.as_str()))?;
                let ids = day_orders
                    .entry(day)
                    .or_insert_with(|| staged.day_ids(day));
                let from = ids
                    .iter()
                    .position(|id| id == item_id)
                    .ok_or_else(|| ItineraryError::not_found(item_id.as_str()))?;
                let id = ids.remove(from);
                let to = (*position as usize).min(ids.len());
                ids.insert(to, id);
                summary.reordered += 1;
            }
        }
        for (day, ids) in &day_orders {
            staged.reorder_day(*day, ids)?;
        }

        for edit in plan.edits() {
            if let PlannedEdit::Add {
                place,
                day,
                start_time,
            } = edit
            {
                let place = place.clone();
                let start = match start_time {
                    Some(start) => *start,
                    None => self.next_free_start(staged, *day)?,
                };
                let visit = SignedDuration::from_mins(i64::from(place.estimated_duration));
                let item = staged.add_item(NewItem {
                    id: Uuid::new_v4().to_string(),
                    trip_id: staged.trip().id.clone(),
                    day_number: *day,
                    order: None,
                    place_id: Some(place.id.clone()),
                    accommodation_id: None,
                    start_time: start,
                    end_time: shift_end(start, visit)?,
                    travel_mode: staged.trip().preferred_transport,
                    travel_duration: None,
                    notes: None,
                })?;
                summary.added += 1;
                summary.new_item_ids.push(item.id);
                summary.new_places.push(place);
            }
        }

        staged.check_invariants()?;
        Ok(summary)
    }

    /// End of the day's last item, or the configured day start.
    fn next_free_start(&self, store: &ItineraryStore, day: u32) -> Result<DateTime> {
        if let Some(last) = store.get_day_items(day).last() {
            return Ok(last.end_time);
        }
        Ok(store.trip().date_of_day(day)?.to_datetime(self.day_start))
    }
}

fn check_suggestion(
    index: usize,
    suggestion: &OptimizationSuggestion,
    store: &ItineraryStore,
    removals: &HashMap<&str, usize>,
) -> std::result::Result<PlannedEdit, String> {
    match suggestion.kind {
        SuggestionKind::Add => check_add(suggestion, store),
        SuggestionKind::Remove => {
            let item = target(suggestion, store)?;
            match removals.get(item.id.as_str()) {
                Some(&first) if first != index => Err(format!(
                    "item '{}' is already removed by suggestion #{}",
                    item.id,
                    first + 1
                )),
                _ => Ok(PlannedEdit::Remove {
                    item_id: item.id.clone(),
                }),
            }
        }
        SuggestionKind::Reorder => {
            let item = target(suggestion, store)?;
            not_removed(item, removals)?;
            let position = suggestion
                .new_order
                .ok_or_else(|| "reorder suggestion has no new order".to_string())?;
            let position = u32::try_from(position)
                .map_err(|_| format!("new order {position} is not a valid position"))?;
            Ok(PlannedEdit::Reorder {
                item_id: item.id.clone(),
                position,
            })
        }
        SuggestionKind::Modify => {
            let item = target(suggestion, store)?;
            not_removed(item, removals)?;
            if suggestion.new_day.is_none()
                && suggestion.new_start_time.is_none()
                && suggestion.place_id.is_none()
            {
                return Err("modify suggestion changes nothing".to_string());
            }
            let day = suggestion.new_day.map(day_number).transpose()?;
            if let Some(day) = day {
                within_trip(store, day)?;
            }
            if let Some(start) = suggestion.new_start_time {
                shift_end(start, item.duration()).map_err(|e| e.to_string())?;
            }
            Ok(PlannedEdit::Modify {
                item_id: item.id.clone(),
                day,
                start_time: suggestion.new_start_time,
                place_id: suggestion.place_id.clone(),
            })
        }
    }
}

/// The existing item a remove, reorder or modify suggestion points at.
fn target<'a>(
    suggestion: &OptimizationSuggestion,
    store: &'a ItineraryStore,
) -> std::result::Result<&'a ItineraryItem, String> {
    let item_id = suggestion
        .item_id
        .as_deref()
        .ok_or_else(|| format!("{} suggestion has no item id", suggestion.kind))?;
    store
        .get_item(item_id)
        .ok_or_else(|| format!("item '{item_id}' does not exist"))
}

fn not_removed(
    item: &ItineraryItem,
    removals: &HashMap<&str, usize>,
) -> std::result::Result<(), String> {
    match removals.get(item.id.as_str()) {
        Some(first) => Err(format!(
            "item '{}' is also removed by suggestion #{}",
            item.id,
            first + 1
        )),
        None => Ok(()),
    }
}

fn check_add(
    suggestion: &OptimizationSuggestion,
    store: &ItineraryStore,
) -> std::result::Result<PlannedEdit, String> {
    let place = suggestion
        .new_place
        .as_ref()
        .ok_or_else(|| "add suggestion has no new place".to_string())?;
    let place = place.to_place(Uuid::new_v4().to_string())?;

    let day = suggestion
        .new_day
        .ok_or_else(|| "add suggestion has no day".to_string())
        .and_then(day_number)?;
    within_trip(store, day)?;

    Ok(PlannedEdit::Add {
        place,
        day,
        start_time: suggestion.new_start_time,
    })
}

fn day_number(day: i64) -> std::result::Result<u32, String> {
    u32::try_from(day)
        .ok()
        .filter(|day| *day >= 1)
        .ok_or_else(|| format!("day {day} is not a valid day number"))
}

fn within_trip(store: &ItineraryStore, day: u32) -> std::result::Result<(), String> {
    let trip = store.trip();
    if trip.contains_day(day) {
        Ok(())
    } else {
        Err(format!(
            "day {day} is outside the trip's {} day(s)",
            trip.day_count()
        ))
    }
}

fn decrement(sizes: &mut BTreeMap<u32, usize>, day: u32) {
    if let Some(size) = sizes.get_mut(&day) {
        *size = size.saturating_sub(1);
    }
}

fn shift_end(start: DateTime, length: SignedDuration) -> Result<DateTime> {
    start.checked_add(length).map_err(|e| {
        ItineraryError::invalid_input("new_start_time")
            .with_reason(format!("visit starting at {start} cannot end in range: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{SuggestedPlace, TravelMode, Trip};

    fn create_test_store() -> ItineraryStore {
        let trip = Trip {
            id: "seoul".to_string(),
            name: "Seoul".to_string(),
            country_id: Some("KR".to_string()),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 3),
            preferred_transport: TravelMode::Transit,
        };
        let mut store = ItineraryStore::new(trip);
        for (day, id, hour) in [(1, "1", 9), (1, "2", 11), (1, "3", 14), (2, "4", 10)] {
            let day_date = date(2024, 5, day as i8);
            store
                .add_item(NewItem {
                    id: id.to_string(),
                    trip_id: "seoul".to_string(),
                    day_number: day,
                    order: None,
                    place_id: Some(format!("place-{id}")),
                    accommodation_id: None,
                    start_time: day_date.at(hour, 0, 0, 0),
                    end_time: day_date.at(hour + 1, 30, 0, 0),
                    travel_mode: TravelMode::Walking,
                    travel_duration: None,
                    notes: None,
                })
                .expect("Failed to add item");
        }
        store.take_changes();
        store
    }

    fn result_of(suggestions: Vec<OptimizationSuggestion>) -> OptimizationResult {
        OptimizationResult {
            suggestions,
            reasoning: "test plan".to_string(),
            ..Default::default()
        }
    }

    fn snapshot(store: &ItineraryStore) -> Vec<ItineraryItem> {
        store.items().cloned().collect()
    }

    #[test]
    fn test_unknown_reorder_target_leaves_store_untouched() {
        let mut store = create_test_store();
        let before = snapshot(&store);

        let result = result_of(vec![OptimizationSuggestion::reorder("ghost", 0, "r")]);
        let err = SuggestionApplier::new().apply(&result, &mut store).unwrap_err();

        match err {
            ItineraryError::Validation { rejections } => {
                assert_eq!(rejections.len(), 1);
                assert_eq!(rejections[0].index, 0);
                assert_eq!(rejections[0].kind, SuggestionKind::Reorder);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(snapshot(&store), before);
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn test_two_adds_get_contiguous_orders() {
        let mut store = create_test_store();
        let result = result_of(vec![
            OptimizationSuggestion::add(SuggestedPlace::new("Local Café", 37.5665, 126.978), 1, "r"),
            OptimizationSuggestion::add(SuggestedPlace::new("Night Market", 37.57, 126.99), 3, "r"),
        ]);

        let summary = SuggestionApplier::new()
            .apply(&result, &mut store)
            .expect("Failed to apply");

        assert_eq!(summary.added, 2);
        assert_eq!(store.len(), 6);
        let day_one = store.get_day_items(1);
        assert_eq!(day_one.last().map(|item| item.order), Some(3));
        let day_three = store.get_day_items(3);
        assert_eq!(day_three.len(), 1);
        assert_eq!(day_three[0].order, 0);
        assert_eq!(day_three[0].start_time, date(2024, 5, 3).at(9, 0, 0, 0));
        assert_eq!(day_three[0].travel_mode, TravelMode::Transit);
        store.check_invariants().expect("invariants hold");
    }

    #[test]
    fn test_added_item_follows_last_item_of_day() {
        let mut store = create_test_store();
        let result = result_of(vec![OptimizationSuggestion::add(
            SuggestedPlace::new("Café", 37.5, 126.9),
            1,
            "r",
        )]);
        let summary = SuggestionApplier::new()
            .apply(&result, &mut store)
            .expect("Failed to apply");

        let added = store.get_item(&summary.new_item_ids[0]).expect("new item");
        assert_eq!(added.start_time, date(2024, 5, 1).at(15, 30, 0, 0));
        assert_eq!(added.duration().as_mins(), 60);
        assert_eq!(added.place_id.as_deref(), Some(summary.new_places[0].id.as_str()));
    }

    #[test]
    fn test_all_rejections_are_reported() {
        let store = create_test_store();
        let result = result_of(vec![
            OptimizationSuggestion::add(SuggestedPlace::new("", 0.0, 0.0), 1, "no name"),
            OptimizationSuggestion::remove("1", "fine"),
            OptimizationSuggestion::add(SuggestedPlace::new("Far", 95.0, 0.0), 1, "bad lat"),
            OptimizationSuggestion::add(SuggestedPlace::new("Zero", 1.0, 1.0), 0, "day 0"),
            OptimizationSuggestion::remove("1", "twice"),
            OptimizationSuggestion::reorder("1", 0, "removed"),
            OptimizationSuggestion::modify("2", "nothing"),
            OptimizationSuggestion::add(SuggestedPlace::new("Late", 1.0, 1.0), 9, "past end"),
        ]);

        let err = SuggestionApplier::new().validate(&result, &store).unwrap_err();
        let ItineraryError::Validation { rejections } = err else {
            panic!("expected validation error");
        };
        let indexes: Vec<usize> = rejections.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_reorder_range_accounts_for_removals() {
        let store = create_test_store();
        let applier = SuggestionApplier::new();

        let too_far = result_of(vec![
            OptimizationSuggestion::remove("3", "r"),
            OptimizationSuggestion::reorder("1", 2, "r"),
        ]);
        assert!(applier.validate(&too_far, &store).is_err());

        let in_range = result_of(vec![
            OptimizationSuggestion::remove("3", "r"),
            OptimizationSuggestion::reorder("1", 1, "r"),
        ]);
        let plan = applier.validate(&in_range, &store).expect("valid plan");
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_mixed_plan() {
        let mut store = create_test_store();
        let result = result_of(vec![
            OptimizationSuggestion::add(SuggestedPlace::new("Café", 37.5, 126.9), 2, "r"),
            OptimizationSuggestion::reorder("1", 1, "r"),
            OptimizationSuggestion::remove("2", "r"),
            OptimizationSuggestion::modify("4", "r")
                .with_start_time(date(2024, 5, 2).at(13, 0, 0, 0)),
        ]);

        let summary = SuggestionApplier::new()
            .apply(&result, &mut store)
            .expect("Failed to apply");

        assert_eq!(
            (summary.added, summary.removed, summary.reordered, summary.modified),
            (1, 1, 1, 1)
        );
        assert_eq!(store.day_ids(1), ["3", "1"]);
        let moved = store.get_item("4").expect("item 4");
        assert_eq!(moved.start_time, date(2024, 5, 2).at(13, 0, 0, 0));
        assert_eq!(moved.end_time, date(2024, 5, 2).at(14, 30, 0, 0));
        let day_two = store.get_day_items(2);
        assert_eq!(day_two[1].start_time, date(2024, 5, 2).at(14, 30, 0, 0));
    }

    #[test]
    fn test_modify_moves_item_to_another_day() {
        let mut store = create_test_store();
        let result = result_of(vec![OptimizationSuggestion::modify("2", "r").with_day(3)]);

        SuggestionApplier::new()
            .apply(&result, &mut store)
            .expect("Failed to apply");

        assert_eq!(store.day_ids(1), ["1", "3"]);
        let moved = store.get_item("2").expect("item 2");
        assert_eq!((moved.day_number, moved.order), (3, 0));
        assert_eq!(moved.start_time, date(2024, 5, 3).at(11, 0, 0, 0));
    }

    #[test]
    fn test_reorder_into_day_filled_by_modify() {
        let store = create_test_store();
        let result = result_of(vec![
            OptimizationSuggestion::modify("1", "r").with_day(2),
            OptimizationSuggestion::reorder("1", 0, "r"),
        ]);
        let plan = SuggestionApplier::new()
            .validate(&result, &store)
            .expect("valid plan");
        assert_eq!(plan.len(), 2);

        let mut store = store;
        SuggestionApplier::new()
            .commit(&plan, &mut store)
            .expect("Failed to commit");
        assert_eq!(store.day_ids(2), ["1", "4"]);
    }

    #[test]
    fn test_bad_place_fields_reject_only_their_suggestion() {
        let store = create_test_store();
        let result: OptimizationResult = serde_json::from_str(
            r#"{
                "suggestions": [
                    {"type": "remove", "itemId": "1", "reasoning": "fine"},
                    {"type": "add", "newPlace": {"name": "Night Market", "latitude": 37.57, "longitude": 126.99,
                        "businessHours": {"open": "25:00", "close": "23:00"}}, "newDay": 1, "reasoning": "bad hours"},
                    {"type": "add", "newPlace": {"name": "Tea House", "latitude": 37.57, "longitude": 126.99,
                        "estimatedDuration": -30}, "newDay": 1, "reasoning": "negative visit"},
                    {"type": "add", "newPlace": {"name": "Spa", "latitude": 37.57, "longitude": 126.99,
                        "category": "wellness"}, "newDay": 1, "reasoning": "unknown category"},
                    {"type": "add", "newPlace": {"name": "Gallery", "latitude": 37.57, "longitude": 126.99,
                        "category": "museum", "businessHours": {"open": "10:00", "close": "19:00"},
                        "estimatedDuration": 45}, "newDay": 2, "reasoning": "fine"}
                ],
                "reasoning": "mixed"
            }"#,
        )
        .expect("Failed to parse result");

        let err = SuggestionApplier::new().validate(&result, &store).unwrap_err();
        let ItineraryError::Validation { rejections } = err else {
            panic!("expected validation error");
        };
        let indexes: Vec<usize> = rejections.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert!(rejections[0].reason.contains("25:00"));

        let good = result_of(vec![result.suggestions[0].clone(), result.suggestions[4].clone()]);
        let plan = SuggestionApplier::new()
            .validate(&good, &store)
            .expect("valid plan");
        let Some(PlannedEdit::Add { place, .. }) = plan.edits().last() else {
            panic!("expected an add edit");
        };
        assert_eq!(place.estimated_duration, 45);
        assert_eq!(place.business_hours.map(|h| h.to_string()).as_deref(), Some("10:00–19:00"));
    }

    #[test]
    fn test_modify_day_must_fall_inside_trip() {
        let mut store = create_test_store();
        let before = snapshot(&store);
        let result = result_of(vec![OptimizationSuggestion::modify("2", "r").with_day(400)]);

        let err = SuggestionApplier::new().apply(&result, &mut store).unwrap_err();
        let ItineraryError::Validation { rejections } = err else {
            panic!("expected validation error");
        };
        assert_eq!(rejections.len(), 1);
        assert!(rejections[0].reason.contains("outside the trip"));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_commit_failure_is_internal_and_leaves_store_untouched() {
        let mut store = create_test_store();
        let before = snapshot(&store);
        let plan = ValidatedPlan {
            edits: vec![
                PlannedEdit::Remove {
                    item_id: "1".to_string(),
                },
                PlannedEdit::Remove {
                    item_id: "ghost".to_string(),
                },
            ],
        };

        let err = SuggestionApplier::new().commit(&plan, &mut store).unwrap_err();
        assert!(matches!(err, ItineraryError::Internal { .. }));
        assert!(!err.is_recoverable());
        assert_eq!(snapshot(&store), before);
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn test_empty_result_is_a_no_op() {
        let mut store = create_test_store();
        let summary = SuggestionApplier::new()
            .apply(&OptimizationResult::default(), &mut store)
            .expect("Failed to apply");
        assert_eq!(summary.total(), 0);
        assert!(!store.has_pending_changes());
    }
}
