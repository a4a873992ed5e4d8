//! Drag-and-drop reordering of a single day.
//!
//! [`DragReorderController`] is a small state machine that turns pointer and
//! keyboard gestures into at most one [`ItineraryStore::reorder_day`] call:
//!
//! ```text
//!            begin                 drop
//!   Idle ────────────▶ Dragging ─────────▶ Dropped ──┐
//!    ▲                    │                          │
//!    │                    │ cancel                   │ reset / begin
//!    │                    ▼                          │
//!    └──────────────── Cancelled ◀───────────────────┘
//! ```
//!
//! While dragging, `hover` and `move_by` only rearrange the controller's
//! provisional view. The store is written exclusively through
//! [`DragReorderController::commit`], which the pointer path (`drop`), the
//! keyboard path (`handle_key`) and single-step moves (`nudge`) all share.
//! Items cannot be dragged across days.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ItineraryError, Result},
    store::ItineraryStore,
};

/// Where the controller is in a gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// An item is picked up; `committed` is the day's order when it was.
    Dragging {
        item_id: String,
        committed: Vec<String>,
    },
    Dropped,
    Cancelled,
}

/// Keyboard gestures, mirroring the pointer path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Space/enter on an item
    PickUp(String),
    Up,
    Down,
    /// Space/enter while dragging
    Drop,
    /// Escape
    Cancel,
}

/// Direction of a one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Reorders the items of one day in response to drag gestures.
#[derive(Debug, Clone)]
pub struct DragReorderController {
    day: u32,
    phase: DragPhase,
    view: Vec<String>,
    notice: Option<String>,
}

impl DragReorderController {
    /// Creates a controller for a day, showing the store's current order.
    pub fn new(store: &ItineraryStore, day: u32) -> Self {
        Self {
            day,
            phase: DragPhase::Idle,
            view: store.day_ids(day),
            notice: None,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Order to display: the provisional order while dragging, otherwise the
    /// last order known to be committed.
    pub fn view(&self) -> &[String] {
        &self.view
    }

    /// Transient message left by a failed commit.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Refreshes the view from the store. Ignored mid-drag.
    pub fn sync(&mut self, store: &ItineraryStore) {
        if !self.is_dragging() {
            self.view = store.day_ids(self.day);
        }
    }

    /// Picks up an item of the controller's day.
    pub fn begin(&mut self, store: &ItineraryStore, item_id: &str) -> Result<()> {
        if self.is_dragging() {
            return Err(ItineraryError::invalid_input("item_id")
                .with_reason("a drag is already in progress"));
        }
        let committed = store.day_ids(self.day);
        if !committed.iter().any(|id| id == item_id) {
            return Err(ItineraryError::invalid_input("item_id")
                .with_reason(format!("item '{item_id}' is not on day {}", self.day)));
        }

        self.view = committed.clone();
        self.notice = None;
        self.phase = DragPhase::Dragging {
            item_id: item_id.to_string(),
            committed,
        };
        debug!("Drag started for {item_id} on day {}", self.day);
        Ok(())
    }

    /// Moves the dragged item to the position of the item under the pointer.
    pub fn hover(&mut self, over_id: &str) -> Result<()> {
        let active = self.active_id()?.to_string();
        if active == over_id {
            return Ok(());
        }
        let from = self.position(&active)?;
        let to = self.position(over_id)?;
        array_move(&mut self.view, from, to);
        Ok(())
    }

    /// Moves the dragged item by `delta` positions, clamped to the day.
    pub fn move_by(&mut self, delta: isize) -> Result<()> {
        let active = self.active_id()?.to_string();
        let from = self.position(&active)?;
        let last = self.view.len().saturating_sub(1);
        let to = from.saturating_add_signed(delta).min(last);
        array_move(&mut self.view, from, to);
        Ok(())
    }

    /// Ends the drag and commits the provisional order.
    ///
    /// Returns `Ok(false)` when the order did not change, in which case the
    /// store is not called.
    pub fn drop(&mut self, store: &mut ItineraryStore) -> Result<bool> {
        let committed = match std::mem::replace(&mut self.phase, DragPhase::Dropped) {
            DragPhase::Dragging { committed, .. } => committed,
            other => {
                self.phase = other;
                return Err(ItineraryError::invalid_input("drag")
                    .with_reason("nothing is being dragged"));
            }
        };

        if self.view == committed {
            debug!("Drop on day {} left the order unchanged", self.day);
            return Ok(false);
        }
        let provisional = self.view.clone();
        self.commit(store, &provisional)?;
        Ok(true)
    }

    /// Abandons the drag and restores the order it started from. Does nothing
    /// when no drag is in progress.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging { committed, .. } => {
                self.view = committed;
                self.phase = DragPhase::Cancelled;
                debug!("Drag cancelled on day {}", self.day);
            }
            other => self.phase = other,
        }
    }

    /// Returns to `Idle`, cancelling any drag in progress.
    pub fn reset(&mut self) {
        self.cancel();
        self.phase = DragPhase::Idle;
    }

    /// Writes a full day order to the store.
    ///
    /// On failure the view reverts to the store's committed order and a
    /// notice is recorded before the error is returned.
    pub fn commit<S: AsRef<str>>(
        &mut self,
        store: &mut ItineraryStore,
        ordered_ids: &[S],
    ) -> Result<()> {
        match store.reorder_day(self.day, ordered_ids) {
            Ok(()) => {
                self.view = ordered_ids.iter().map(|id| id.as_ref().to_string()).collect();
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                warn!("Reverting day {} after failed reorder: {err}", self.day);
                self.view = store.day_ids(self.day);
                self.notice = Some(format!("Could not save the new order: {err}"));
                Err(err)
            }
        }
    }

    /// Keyboard path. Returns whether the store changed.
    pub fn handle_key(&mut self, store: &mut ItineraryStore, key: KeyCommand) -> Result<bool> {
        match key {
            KeyCommand::PickUp(id) => {
                self.begin(store, &id)?;
                Ok(false)
            }
            KeyCommand::Up => self.move_by(-1).map(|_| false),
            KeyCommand::Down => self.move_by(1).map(|_| false),
            KeyCommand::Drop => self.drop(store),
            KeyCommand::Cancel => {
                self.cancel();
                Ok(false)
            }
        }
    }

    /// Moves one item a single step and commits immediately.
    ///
    /// Returns `Ok(false)` if the item is already at that edge of the day.
    pub fn nudge(
        &mut self,
        store: &mut ItineraryStore,
        item_id: &str,
        direction: MoveDirection,
    ) -> Result<bool> {
        if self.is_dragging() {
            return Err(ItineraryError::invalid_input("item_id")
                .with_reason("cannot nudge while a drag is in progress"));
        }
        let mut ids = store.day_ids(self.day);
        let from = ids.iter().position(|id| id == item_id).ok_or_else(|| {
            ItineraryError::invalid_input("item_id")
                .with_reason(format!("item '{item_id}' is not on day {}", self.day))
        })?;
        let to = match direction {
            MoveDirection::Up if from > 0 => from - 1,
            MoveDirection::Down if from + 1 < ids.len() => from + 1,
            _ => return Ok(false),
        };

        array_move(&mut ids, from, to);
        self.commit(store, &ids)?;
        Ok(true)
    }

    fn active_id(&self) -> Result<&str> {
        match &self.phase {
            DragPhase::Dragging { item_id, .. } => Ok(item_id),
            _ => Err(ItineraryError::invalid_input("drag").with_reason("nothing is being dragged")),
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.view.iter().position(|existing| existing == id).ok_or_else(|| {
            ItineraryError::invalid_input("item_id")
                .with_reason(format!("item '{id}' is not on day {}", self.day))
        })
    }
}

/// Removes the element at `from` and reinserts it at `to`.
fn array_move(ids: &mut Vec<String>, from: usize, to: usize) {
    if from == to || from >= ids.len() || to >= ids.len() {
        return;
    }
    let id = ids.remove(from);
    ids.insert(to, id);
}
