//! The canonical, per-session collection of itinerary items.
//!
//! [`ItineraryStore`] owns every item of one trip and is the only place their
//! `order` fields are written. Each day is kept as an ordered list of ids, and
//! item orders are renumbered from that list after every structural change,
//! so the following hold after every committed mutation:
//!
//! 1. Per day, `order` values are exactly `0..n-1`.
//! 2. Item ids are unique.
//! 3. `day_number >= 1`.
//! 4. `start_time < end_time`.
//! 5. Every item belongs to the store's trip and references at most one of a
//!    place or an accommodation.
//!
//! Every operation validates before touching state, so a failed call leaves
//! the store exactly as it was. Successful calls append to a change journal
//! (see [`ItineraryStore::take_changes`]) that the persistence layer drains.

use std::collections::{BTreeMap, HashSet};

use jiff::ToSpan;
use log::{debug, warn};

use crate::{
    error::{ItineraryError, Result},
    models::{ItemPatch, ItineraryChange, ItineraryItem, NewItem, Trip},
};

/// Ordered itinerary items of a single trip.
#[derive(Debug, Clone)]
pub struct ItineraryStore {
    trip: Trip,
    items: BTreeMap<String, ItineraryItem>,
    days: BTreeMap<u32, Vec<String>>,
    changes: Vec<ItineraryChange>,
}

impl ItineraryStore {
    /// Creates an empty store for a trip.
    pub fn new(trip: Trip) -> Self {
        Self {
            trip,
            items: BTreeMap::new(),
            days: BTreeMap::new(),
            changes: Vec::new(),
        }
    }

    /// Creates a store from previously persisted items.
    ///
    /// Items are grouped by day and sorted by their stored order (ties broken
    /// by id). If the stored orders have gaps they are renumbered and the
    /// renumbered items are recorded in the change journal.
    pub fn with_items(trip: Trip, items: impl IntoIterator<Item = ItineraryItem>) -> Result<Self> {
        let mut store = Self::new(trip);
        let mut sorted: Vec<ItineraryItem> = items.into_iter().collect();
        sorted.sort_by(|a, b| {
            (a.day_number, a.order, &a.id).cmp(&(b.day_number, b.order, &b.id))
        });

        for item in sorted {
            store.validate_item(&item)?;
            if store.items.contains_key(&item.id) {
                return Err(ItineraryError::invariant(format!(
                    "item id '{}' appears more than once",
                    item.id
                )));
            }
            store
                .days
                .entry(item.day_number)
                .or_default()
                .push(item.id.clone());
            store.items.insert(item.id.clone(), item);
        }

        let day_numbers: Vec<u32> = store.days.keys().copied().collect();
        for day in day_numbers {
            store.renumber_day(day);
        }
        if !store.changes.is_empty() {
            warn!(
                "Renumbered {} item(s) with non-contiguous order on load",
                store.changes.len()
            );
        }
        Ok(store)
    }

    /// The trip this store belongs to.
    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Adds an item.
    ///
    /// Without an explicit `order` the item is appended to its day. An
    /// explicit `order` must be unique within the day and keep the day
    /// contiguous, which means it must name the next free slot.
    pub fn add_item(&mut self, new: NewItem) -> Result<ItineraryItem> {
        let day = new.day_number;
        let count = self.day_len(day) as u32;
        let order = match new.order {
            None => count,
            Some(order) if order == count => order,
            Some(order) if order < count => {
                return Err(ItineraryError::invariant(format!(
                    "order {order} is already taken on day {day}"
                )));
            }
            Some(order) => {
                return Err(ItineraryError::invariant(format!(
                    "order {order} would leave a gap on day {day}, which has {count} item(s)"
                )));
            }
        };

        let item = new.into_item(order);
        self.check_new_item(&item)?;

        self.days.entry(day).or_default().push(item.id.clone());
        self.items.insert(item.id.clone(), item.clone());
        self.changes.push(ItineraryChange::Upserted(item.clone()));
        debug!("Added item {} to day {day} at {order}", item.id);
        Ok(item)
    }

    /// Inserts an item at a position within its day, shifting every item at
    /// or after that position one place down.
    pub fn insert_item(&mut self, new: NewItem, position: u32) -> Result<ItineraryItem> {
        let day = new.day_number;
        let count = self.day_len(day) as u32;
        if position > count {
            return Err(ItineraryError::invariant(format!(
                "position {position} is out of range; day {day} has {count} item(s)"
            )));
        }

        let item = new.into_item(position);
        self.check_new_item(&item)?;

        self.days
            .entry(day)
            .or_default()
            .insert(position as usize, item.id.clone());
        self.items.insert(item.id.clone(), item.clone());
        self.changes.push(ItineraryChange::Upserted(item.clone()));
        self.renumber_day(day);
        debug!("Inserted item {} into day {day} at {position}", item.id);
        Ok(item)
    }

    /// Applies a partial update to an item. Position fields cannot be changed
    /// here; use [`ItineraryStore::reorder_day`] or
    /// [`ItineraryStore::move_item`].
    pub fn update_item(&mut self, id: &str, patch: &ItemPatch) -> Result<ItineraryItem> {
        let current = self
            .items
            .get(id)
            .ok_or_else(|| ItineraryError::not_found(id))?;
        if patch.is_empty() {
            return Ok(current.clone());
        }

        let updated = patch.applied_to(current);
        self.validate_item(&updated)?;

        self.items.insert(id.to_string(), updated.clone());
        self.changes.push(ItineraryChange::Upserted(updated.clone()));
        debug!("Updated item {id}");
        Ok(updated)
    }

    /// Removes an item and closes the gap it leaves in its day.
    pub fn remove_item(&mut self, id: &str) -> Result<ItineraryItem> {
        let removed = self
            .items
            .remove(id)
            .ok_or_else(|| ItineraryError::not_found(id))?;
        let day = removed.day_number;
        if let Some(ids) = self.days.get_mut(&day) {
            ids.retain(|existing| existing != id);
        }

        self.changes.push(ItineraryChange::Removed { id: id.to_string() });
        self.renumber_day(day);
        debug!("Removed item {id} from day {day}");
        Ok(removed)
    }

    /// Replaces the order of a day.
    ///
    /// `ordered_ids` must be exactly a permutation of the day's current ids:
    /// same length, same members, no duplicates. On success each item's
    /// `order` becomes its index in `ordered_ids`.
    pub fn reorder_day<S: AsRef<str>>(&mut self, day: u32, ordered_ids: &[S]) -> Result<()> {
        if let Err(err) = self.check_permutation(day, ordered_ids) {
            warn!("Rejected reorder of day {day}: {err}");
            return Err(err);
        }
        if ordered_ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = ordered_ids.iter().map(|id| id.as_ref().to_string()).collect();
        self.days.insert(day, ids);
        self.renumber_day(day);
        debug!("Reordered day {day} ({} items)", ordered_ids.len());
        Ok(())
    }

    /// Moves an item to the end of another day, keeping its wall-clock times
    /// and shifting its dates by the day difference.
    pub fn move_item(&mut self, id: &str, day: u32) -> Result<ItineraryItem> {
        let current = self
            .items
            .get(id)
            .ok_or_else(|| ItineraryError::not_found(id))?;
        if day < 1 {
            return Err(ItineraryError::invariant("day number must be at least 1"));
        }
        let from_day = current.day_number;
        if from_day == day {
            return Ok(current.clone());
        }

        let shift = (i64::from(day) - i64::from(from_day)).days();
        let shift_error = |e: jiff::Error| {
            ItineraryError::invariant(format!("cannot move item {id} to day {day}: {e}"))
        };
        let mut moved = current.clone();
        moved.start_time = moved.start_time.checked_add(shift).map_err(shift_error)?;
        moved.end_time = moved.end_time.checked_add(shift).map_err(shift_error)?;
        moved.day_number = day;
        moved.order = self.day_len(day) as u32;

        if let Some(ids) = self.days.get_mut(&from_day) {
            ids.retain(|existing| existing != id);
        }
        self.days.entry(day).or_default().push(id.to_string());
        self.items.insert(id.to_string(), moved.clone());
        self.changes.push(ItineraryChange::Upserted(moved.clone()));
        self.renumber_day(from_day);
        debug!("Moved item {id} from day {from_day} to day {day}");
        Ok(moved)
    }

    /// Items of a day sorted by order. The returned vector is a snapshot.
    pub fn get_day_items(&self, day: u32) -> Vec<ItineraryItem> {
        self.days
            .get(&day)
            .map(|ids| ids.iter().filter_map(|id| self.items.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    /// Ids of a day in order.
    pub fn day_ids(&self, day: u32) -> Vec<String> {
        self.days.get(&day).cloned().unwrap_or_default()
    }

    pub fn day_len(&self, day: u32) -> usize {
        self.days.get(&day).map_or(0, Vec::len)
    }

    /// Day numbers that currently hold at least one item, ascending.
    pub fn day_numbers(&self) -> Vec<u32> {
        self.days.keys().copied().collect()
    }

    pub fn get_item(&self, id: &str) -> Option<&ItineraryItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// All items, by day then order.
    pub fn items(&self) -> impl Iterator<Item = &ItineraryItem> + '_ {
        self.days
            .values()
            .flat_map(|ids| ids.iter().filter_map(|id| self.items.get(id)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drains the journal of committed changes.
    pub fn take_changes(&mut self) -> Vec<ItineraryChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Verifies every store invariant from scratch.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (&day, ids) in &self.days {
            for (index, id) in ids.iter().enumerate() {
                let item = self.items.get(id).ok_or_else(|| {
                    ItineraryError::invariant(format!("day {day} lists unknown item '{id}'"))
                })?;
                if !seen.insert(id.as_str()) {
                    return Err(ItineraryError::invariant(format!(
                        "item '{id}' is listed more than once"
                    )));
                }
                if item.day_number != day || item.order as usize != index {
                    return Err(ItineraryError::invariant(format!(
                        "item '{id}' is at day {}/order {} but listed at day {day}/position {index}",
                        item.day_number, item.order
                    )));
                }
                self.validate_item(item)?;
            }
        }
        if seen.len() != self.items.len() {
            return Err(ItineraryError::invariant(
                "some items are not listed under any day",
            ));
        }
        Ok(())
    }

    fn check_new_item(&self, item: &ItineraryItem) -> Result<()> {
        if self.items.contains_key(&item.id) {
            return Err(ItineraryError::invariant(format!(
                "item id '{}' already exists",
                item.id
            )));
        }
        self.validate_item(item)
    }

    /// Field-level rules every stored item must satisfy.
    fn validate_item(&self, item: &ItineraryItem) -> Result<()> {
        if item.day_number < 1 {
            return Err(ItineraryError::invariant("day number must be at least 1"));
        }
        if item.start_time >= item.end_time {
            return Err(ItineraryError::invariant(format!(
                "start time {} must be before end time {}",
                item.start_time, item.end_time
            )));
        }
        if item.trip_id != self.trip.id {
            return Err(ItineraryError::invariant(format!(
                "item belongs to trip '{}', not '{}'",
                item.trip_id, self.trip.id
            )));
        }
        if item.place_id.is_some() && item.accommodation_id.is_some() {
            return Err(ItineraryError::invariant(
                "an item cannot reference both a place and an accommodation",
            ));
        }
        Ok(())
    }

    fn check_permutation<S: AsRef<str>>(&self, day: u32, ordered_ids: &[S]) -> Result<()> {
        if day < 1 {
            return Err(ItineraryError::invariant("day number must be at least 1"));
        }
        let current = self.days.get(&day).map(Vec::as_slice).unwrap_or_default();
        if ordered_ids.len() != current.len() {
            return Err(ItineraryError::invariant(format!(
                "day {day} has {} item(s) but {} id(s) were given",
                current.len(),
                ordered_ids.len()
            )));
        }

        let members: HashSet<&str> = current.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        for id in ordered_ids {
            let id = id.as_ref();
            if !members.contains(id) {
                return Err(ItineraryError::invariant(format!(
                    "item '{id}' is not on day {day}"
                )));
            }
            if !seen.insert(id) {
                return Err(ItineraryError::invariant(format!(
                    "item '{id}' appears more than once"
                )));
            }
        }
        Ok(())
    }

    /// Rewrites `order` from the day's id list, journalling items whose
    /// order changed, and drops the day once it is empty.
    fn renumber_day(&mut self, day: u32) {
        let Some(ids) = self.days.get(&day) else {
            return;
        };
        if ids.is_empty() {
            self.days.remove(&day);
            return;
        }
        for (index, id) in ids.iter().enumerate() {
            if let Some(item) = self.items.get_mut(id) {
                if item.order != index as u32 {
                    item.order = index as u32;
                    self.changes.push(ItineraryChange::Upserted(item.clone()));
                }
            }
        }
    }
}
