//! Time formatting for itinerary visits.

use std::fmt;

use crate::{hours::ClockTime, models::ItineraryItem};

/// Formats an item's start and end as `HH:MM–HH:MM`, adding the end date
/// when the visit runs past midnight.
pub struct VisitWindow<'a>(pub &'a ItineraryItem);

impl fmt::Display for VisitWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = ClockTime::from(self.0.start_time.time());
        let end = ClockTime::from(self.0.end_time.time());
        if self.0.start_time.date() == self.0.end_time.date() {
            write!(f, "{start}–{end}")
        } else {
            write!(f, "{start}–{} {end}", self.0.end_time.date())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::TravelMode;

    #[test]
    fn test_visit_window() {
        let mut item = ItineraryItem {
            id: "a".to_string(),
            trip_id: "t".to_string(),
            day_number: 1,
            order: 0,
            place_id: None,
            accommodation_id: None,
            start_time: date(2024, 5, 1).at(9, 5, 0, 0),
            end_time: date(2024, 5, 1).at(10, 30, 0, 0),
            travel_mode: TravelMode::Walking,
            travel_duration: None,
            notes: None,
        };
        assert_eq!(VisitWindow(&item).to_string(), "09:05–10:30");

        item.end_time = date(2024, 5, 2).at(1, 0, 0, 0);
        assert_eq!(VisitWindow(&item).to_string(), "09:05–2024-05-02 01:00");
    }
}
