//! Accommodation operations for the Planner.

use super::Planner;
use crate::{
    display::Accommodations,
    error::{ItineraryError, Result},
    models::Accommodation,
    params::{CreateAccommodation, Id, TripAccommodation},
};

impl Planner {
    /// Adds an accommodation to a trip.
    pub async fn add_accommodation(&self, params: &CreateAccommodation) -> Result<Accommodation> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| db.add_accommodation(&params))
            .await
    }

    /// Lists a trip's accommodations by check-in.
    pub async fn list_accommodations(&self, params: &Id) -> Result<Accommodations> {
        let trip_id = params.id.clone();

        let stays = self
            .with_database(move |db| {
                if db.get_trip(&trip_id)?.is_none() {
                    return Err(ItineraryError::TripNotFound { id: trip_id });
                }
                db.list_accommodations(&trip_id)
            })
            .await?;
        Ok(Accommodations(stays))
    }

    /// Removes an accommodation. One still used by an item stays.
    pub async fn remove_accommodation(&self, params: &TripAccommodation) -> Result<Accommodation> {
        let params = params.clone();

        self.with_database(move |db| {
            db.delete_accommodation(&params.trip_id, &params.accommodation_id)
        })
        .await
    }
}
