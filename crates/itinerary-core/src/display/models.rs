//! Display implementations for domain models.
//!
//! All output is markdown; headings are chosen so that a trip, its days and
//! their items nest when printed together.

use std::fmt;

use super::datetime::VisitWindow;
use crate::{
    models::{Accommodation, ItineraryItem, Place, PlaceCategory, TravelMode, Trip},
    session::TimelineEntry,
};

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(
            f,
            "- Dates: {} to {} ({} days)",
            self.start_date,
            self.end_date,
            self.day_count()
        )?;
        if let Some(country) = &self.country_id {
            writeln!(f, "- Country: {country}")?;
        }
        writeln!(f, "- Transport: {}", self.preferred_transport)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.name, self.category)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Location**: {:.5}, {:.5}", self.latitude, self.longitude)?;
        if let Some(hours) = &self.business_hours {
            writeln!(f, "- **Hours**: {hours}")?;
        }
        writeln!(f, "- **Visit**: {} min", self.estimated_duration)?;
        if let Some(cost) = self.estimated_cost {
            writeln!(f, "- **Cost**: {cost:.2}")?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- **Tags**: {}", self.tags.join(", "))?;
        }
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Location**: {:.5}, {:.5}", self.latitude, self.longitude)?;
        writeln!(
            f,
            "- **Stay**: {} to {} ({} night(s))",
            self.check_in.strftime("%Y-%m-%d %H:%M"),
            self.check_out.strftime("%Y-%m-%d %H:%M"),
            self.nights()
        )?;
        writeln!(f)
    }
}

impl ItineraryItem {
    /// What the item visits, without catalog context.
    fn label(&self) -> String {
        match (&self.place_id, &self.accommodation_id) {
            (Some(place), _) => format!("Place {place}"),
            (None, Some(stay)) => format!("Stay {stay}"),
            (None, None) => "Free time".to_string(),
        }
    }

    fn fmt_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        match self.travel_duration {
            Some(minutes) => writeln!(f, "- Travel: {}, {minutes} min", self.travel_mode)?,
            None => writeln!(f, "- Travel: {}", self.travel_mode)?,
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "- Notes: {notes}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ItineraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} {} (day {})",
            self.order + 1,
            VisitWindow(self),
            self.label(),
            self.day_number
        )?;
        self.fmt_details(f)
    }
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (&self.place, &self.accommodation) {
            (Some(place), _) => place.name.clone(),
            (None, Some(stay)) => format!("Stay at {}", stay.name),
            (None, None) => self.item.label(),
        };
        write!(
            f,
            "### {}. {} {label}",
            self.item.order + 1,
            VisitWindow(&self.item)
        )?;
        if let Some(status) = self.status {
            write!(f, " ({})", status.with_icon())?;
        }
        writeln!(f)?;
        self.item.fmt_details(f)
    }
}
