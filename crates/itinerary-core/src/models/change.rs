//! Change journal entries emitted by the store.

use serde::{Deserialize, Serialize};

use super::ItineraryItem;

/// A committed change to persist through the CRUD layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum ItineraryChange {
    /// The item was created or any of its fields (including `order`) changed
    Upserted(ItineraryItem),
    /// The item was deleted
    Removed { id: String },
}

impl ItineraryChange {
    /// Id of the affected item.
    pub fn item_id(&self) -> &str {
        match self {
            ItineraryChange::Upserted(item) => &item.id,
            ItineraryChange::Removed { id } => id,
        }
    }
}
