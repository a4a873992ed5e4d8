//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{
    models::{Accommodation, Place, Trip},
    session::TimelineEntry,
};

/// Newtype wrapper for displaying a list of trips.
pub struct Trips(pub Vec<Trip>);

impl Trips {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.0.iter()
    }
}

impl IntoIterator for Trips {
    type Item = Trip;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Trips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trips found.");
        }
        for trip in &self.0 {
            writeln!(f, "## {} (ID: {})", trip.name, trip.id)?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Dates**: {} to {} ({} days)",
                trip.start_date,
                trip.end_date,
                trip.day_count()
            )?;
            writeln!(f, "- **Transport**: {}", trip.preferred_transport)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the place catalog.
pub struct Places(pub Vec<Place>);

impl Places {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.0.iter()
    }
}

impl IntoIterator for Places {
    type Item = Place;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Places {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No places found.");
        }
        for place in &self.0 {
            write!(f, "{place}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a trip's accommodations.
pub struct Accommodations(pub Vec<Accommodation>);

impl Accommodations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Accommodation> {
        self.0.iter()
    }
}

impl fmt::Display for Accommodations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No accommodations found.");
        }
        for stay in &self.0 {
            write!(f, "{stay}")?;
        }
        Ok(())
    }
}

/// One day of a trip with its items in order.
#[derive(Debug, Clone)]
pub struct DayTimeline {
    pub day_number: u32,
    /// Calendar date of the day, when it falls inside the trip
    pub date: Option<jiff::civil::Date>,
    pub entries: Vec<TimelineEntry>,
}

impl DayTimeline {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item ids in order.
    pub fn item_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.item.id.as_str()).collect()
    }
}

impl fmt::Display for DayTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => writeln!(f, "## Day {} ({date})", self.day_number)?,
            None => writeln!(f, "## Day {}", self.day_number)?,
        }
        writeln!(f)?;
        if self.entries.is_empty() {
            writeln!(f, "Nothing planned.")?;
            return writeln!(f);
        }
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// A whole trip, day by day.
#[derive(Debug, Clone)]
pub struct TripItinerary {
    pub trip: Trip,
    pub days: Vec<DayTimeline>,
}

impl fmt::Display for TripItinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trip)?;
        for day in &self.days {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}
