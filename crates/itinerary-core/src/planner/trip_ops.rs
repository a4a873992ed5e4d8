//! Trip and place catalog operations for the Planner.

use jiff::ToSpan;

use super::Planner;
use crate::{
    display::{DayTimeline, Places, TripItinerary, Trips, UpdateResult},
    error::{ItineraryError, Result},
    models::{ItineraryItem, Place, Trip},
    params::{CreatePlace, CreateTrip, Id, UpdatePlace, UpdateTrip},
    session::PlanningSession,
};

impl Planner {
    /// Creates a trip after validating its name and date range.
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| db.create_trip(&params)).await
    }

    /// Retrieves a trip by its ID.
    pub async fn get_trip(&self, params: &Id) -> Result<Option<Trip>> {
        let trip_id = params.id.clone();

        self.with_database(move |db| db.get_trip(&trip_id)).await
    }

    /// Lists all trips, earliest first.
    pub async fn list_trips(&self) -> Result<Trips> {
        let trips = self.with_database(|db| db.list_trips()).await?;
        Ok(Trips(trips))
    }

    /// Changes a trip's name, dates or defaults.
    ///
    /// A new start date moves every item by the same number of days so it
    /// keeps its day number. Shortening the trip is rejected while items sit
    /// on the days it would drop.
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<UpdateResult<Trip>> {
        params.validate()?;
        if params.is_empty() {
            return Err(ItineraryError::invalid_input("trip").with_reason("No changes given"));
        }
        let params = params.clone();

        self.with_database(move |db| {
            let current = db
                .get_trip(&params.id)?
                .ok_or_else(|| ItineraryError::TripNotFound {
                    id: params.id.clone(),
                })?;
            let (trip, changes) = updated_trip(&current, &params)?;

            let items = db.load_items(&trip.id)?;
            if let Some(last) = items.iter().map(|item| item.day_number).max() {
                if last > trip.day_count() {
                    return Err(ItineraryError::invalid_input("end_date").with_reason(format!(
                        "day {last} has items but the trip would only have {} day(s)",
                        trip.day_count()
                    )));
                }
            }
            let moved = shift_items(&current, &trip, items)?;

            db.update_trip(&trip, &moved)?;
            Ok(UpdateResult::with_changes(trip, changes))
        })
        .await
    }

    /// Deletes a trip with its items and accommodations.
    pub async fn delete_trip(&self, params: &Id) -> Result<Trip> {
        let trip_id = params.id.clone();

        self.with_database(move |db| db.delete_trip(&trip_id)).await
    }

    /// Loads a trip with every day from its first to its last, including
    /// items parked on days past the end date.
    pub async fn trip_itinerary(&self, params: &Id) -> Result<TripItinerary> {
        let session = self.open_session(&params.id).await?;
        let trip = session.trip().clone();

        let mut days: Vec<u32> = (1..=trip.day_count()).collect();
        for day in session.store().day_numbers() {
            if !days.contains(&day) {
                days.push(day);
            }
        }

        let days = days
            .into_iter()
            .map(|day| day_timeline(&session, day))
            .collect();
        Ok(TripItinerary { trip, days })
    }

    /// Adds a place to the catalog.
    pub async fn add_place(&self, params: &CreatePlace) -> Result<Place> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| db.add_place(&params)).await
    }

    /// Retrieves a place by its ID.
    pub async fn get_place(&self, params: &Id) -> Result<Option<Place>> {
        let place_id = params.id.clone();

        self.with_database(move |db| db.get_place(&place_id)).await
    }

    /// Changes a catalog place. Items pick up new hours and visit lengths the
    /// next time they are loaded.
    pub async fn update_place(&self, params: &UpdatePlace) -> Result<UpdateResult<Place>> {
        params.validate()?;
        let params = params.clone();

        self.with_database(move |db| {
            let place = db
                .get_place(&params.id)?
                .ok_or_else(|| ItineraryError::resource_not_found("Place", params.id.as_str()))?;
            let (place, changes) = params.applied_to(&place)?;
            db.save_place(&place)?;
            Ok(UpdateResult::with_changes(place, changes))
        })
        .await
    }

    /// Removes a place from the catalog. Places still used by an item stay.
    pub async fn remove_place(&self, params: &Id) -> Result<Place> {
        let place_id = params.id.clone();

        self.with_database(move |db| db.remove_place(&place_id))
            .await
    }

    /// Lists the place catalog by name.
    pub async fn list_places(&self) -> Result<Places> {
        let places = self.with_database(|db| db.list_places()).await?;
        Ok(Places(places))
    }
}

/// Builds the timeline of one day from a session.
pub(crate) fn day_timeline(session: &PlanningSession, day: u32) -> DayTimeline {
    let trip = session.trip();
    let date = if trip.contains_day(day) {
        trip.date_of_day(day).ok()
    } else {
        None
    };

    DayTimeline {
        day_number: day,
        date,
        entries: session.timeline(day),
    }
}

/// Merges an update into a trip and describes what changed.
fn updated_trip(current: &Trip, params: &UpdateTrip) -> Result<(Trip, Vec<String>)> {
    let mut trip = current.clone();
    let mut changes = Vec::new();

    if let Some(name) = &params.name {
        trip.name = name.trim().to_string();
        changes.push(format!("Name: {}", trip.name));
    }
    if let Some(country) = &params.country_id {
        trip.country_id = Some(country.clone());
        changes.push(format!("Country: {country}"));
    }
    if let Some(start) = params.start_date {
        trip.start_date = start;
    }
    if let Some(end) = params.end_date {
        trip.end_date = end;
    }
    if trip.end_date < trip.start_date {
        return Err(ItineraryError::invalid_input("end_date").with_reason(format!(
            "End date {} is before start date {}",
            trip.end_date, trip.start_date
        )));
    }
    if params.start_date.is_some() || params.end_date.is_some() {
        changes.push(format!("Dates: {} to {}", trip.start_date, trip.end_date));
    }
    if let Some(mode) = params.preferred_transport {
        trip.preferred_transport = mode;
        changes.push(format!("Transport: {mode}"));
    }
    Ok((trip, changes))
}

/// Moves item times along with a new start date. Returns only the items
/// that changed.
fn shift_items(
    before: &Trip,
    after: &Trip,
    items: Vec<ItineraryItem>,
) -> Result<Vec<ItineraryItem>> {
    let days = before
        .start_date
        .until(after.start_date)
        .map_err(|e| {
            ItineraryError::invalid_input("start_date")
                .with_reason(format!("cannot move the trip: {e}"))
        })?
        .get_days();
    if days == 0 {
        return Ok(Vec::new());
    }

    let shift = days.days();
    items
        .into_iter()
        .map(|mut item| {
            let shift_error = |e: jiff::Error| {
                ItineraryError::invalid_input("start_date")
                    .with_reason(format!("cannot move item {}: {e}", item.id))
            };
            item.start_time = item.start_time.checked_add(shift).map_err(shift_error)?;
            item.end_time = item.end_time.checked_add(shift).map_err(shift_error)?;
            Ok(item)
        })
        .collect()
}

/// Rejects day numbers outside the trip.
pub(crate) fn check_day(trip: &Trip, day: u32) -> Result<()> {
    if trip.contains_day(day) {
        Ok(())
    } else {
        Err(ItineraryError::invalid_input("day_number").with_reason(format!(
            "day {day} is outside trip '{}' (days 1 to {})",
            trip.name,
            trip.day_count()
        )))
    }
}
