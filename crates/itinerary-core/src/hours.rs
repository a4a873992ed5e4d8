//! Business-hours classification for itinerary visits.
//!
//! A visit is classified against a place's opening window using minutes since
//! midnight:
//!
//! ```text
//!   closed  | closingSoon |        open         | closingSoon |  closed
//! ----------+-------------+---------------------+-------------+----------
//!         open        open+30              close-30        close
//! ```
//!
//! Both window edges are inclusive, so a visit at exactly `open` or `close` is
//! `ClosingSoon` rather than `Closed`.
//!
//! Windows whose close time is earlier than their open time (a bar open
//! 22:00–02:00) wrap past midnight: the close time and any visit before the
//! open time are shifted by one day before the comparison.

use std::{fmt, str::FromStr};

use jiff::civil;
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};

const MINUTES_PER_DAY: u16 = 24 * 60;
/// Margin at each edge of the window that counts as "closing soon".
pub const EDGE_MARGIN_MINUTES: u16 = 30;

/// A wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a clock time, rejecting hours above 23 or minutes above 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ItineraryError::invalid_input("time")
                .with_reason(format!("{hour:02}:{minute:02} is not a valid time of day")));
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl FromStr for ClockTime {
    type Err = ItineraryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            ItineraryError::invalid_input("time")
                .with_reason(format!("'{s}' is not in HH:MM format"))
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !digits(hour)
            || !digits(minute)
        {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ItineraryError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl From<civil::Time> for ClockTime {
    fn from(time: civil::Time) -> Self {
        // jiff guarantees hour in 0..=23 and minute in 0..=59
        Self(time.hour() as u16 * 60 + time.minute() as u16)
    }
}

impl From<ClockTime> for civil::Time {
    fn from(value: ClockTime) -> Self {
        // ClockTime::new keeps hour below 24 and minute below 60
        civil::time(value.hour() as i8, value.minute() as i8, 0, 0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Daily opening window of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl BusinessHours {
    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        Self { open, close }
    }

    /// Parses a window from two `HH:MM` strings.
    pub fn parse(open: &str, close: &str) -> Result<Self> {
        Ok(Self::new(open.parse()?, close.parse()?))
    }

    /// Whether the window wraps past midnight.
    pub fn is_overnight(&self) -> bool {
        self.close < self.open
    }
}

impl fmt::Display for BusinessHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.open, self.close)
    }
}

/// Status badge of a visit relative to the place's opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessHoursStatus {
    /// Comfortably inside the window
    Open,
    /// Within 30 minutes of opening or closing
    ClosingSoon,
    /// Outside the window
    Closed,
}

impl BusinessHoursStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessHoursStatus::Open => "open",
            BusinessHoursStatus::ClosingSoon => "closingSoon",
            BusinessHoursStatus::Closed => "closed",
        }
    }

    /// Get status with an icon for badge display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            BusinessHoursStatus::Open => "● Open",
            BusinessHoursStatus::ClosingSoon => "◐ Closing soon",
            BusinessHoursStatus::Closed => "○ Closed",
        }
    }
}

impl fmt::Display for BusinessHoursStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a visit time against an opening window.
pub fn classify(visit: ClockTime, hours: &BusinessHours) -> BusinessHoursStatus {
    let open = hours.open.minutes();
    let mut close = hours.close.minutes();
    let mut visit = visit.minutes();

    if hours.is_overnight() {
        close += MINUTES_PER_DAY;
        if visit < open {
            visit += MINUTES_PER_DAY;
        }
    }

    if visit < open || visit > close {
        BusinessHoursStatus::Closed
    } else if visit < open + EDGE_MARGIN_MINUTES
        || i32::from(visit) > i32::from(close) - i32::from(EDGE_MARGIN_MINUTES)
    {
        BusinessHoursStatus::ClosingSoon
    } else {
        BusinessHoursStatus::Open
    }
}

/// Classifies the wall-clock part of a visit's start time.
pub fn classify_visit(visit: civil::DateTime, hours: &BusinessHours) -> BusinessHoursStatus {
    classify(ClockTime::from(visit.time()), hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> ClockTime {
        s.parse().expect("valid clock time")
    }

    fn nine_to_six() -> BusinessHours {
        BusinessHours::parse("09:00", "18:00").expect("valid window")
    }

    #[test]
    fn test_parse_rejects_signs_and_stray_characters() {
        for text in ["+9:00", "09:+5", "-1:00", " 9:0 ", "9h:00", "09:00:00"] {
            assert!(text.parse::<ClockTime>().is_err(), "{text} should not parse");
        }
        assert_eq!(at("9:05"), at("09:05"));
    }

    #[test]
    fn test_converts_to_civil_time() {
        assert_eq!(civil::Time::from(at("07:05")), civil::time(7, 5, 0, 0));
        assert_eq!(ClockTime::from(civil::time(23, 59, 30, 0)), at("23:59"));
    }

    #[test]
    fn test_classify_boundaries() {
        let hours = nine_to_six();
        assert_eq!(classify(at("08:50"), &hours), BusinessHoursStatus::Closed);
        assert_eq!(classify(at("09:10"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("09:40"), &hours), BusinessHoursStatus::Open);
        assert_eq!(classify(at("17:45"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("18:05"), &hours), BusinessHoursStatus::Closed);
    }

    #[test]
    fn test_window_edges_are_inclusive() {
        let hours = nine_to_six();
        assert_eq!(classify(at("09:00"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("18:00"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("09:30"), &hours), BusinessHoursStatus::Open);
        assert_eq!(classify(at("17:30"), &hours), BusinessHoursStatus::Open);
    }

    #[test]
    fn test_short_window_is_never_open() {
        let hours = BusinessHours::parse("12:00", "12:40").expect("valid window");
        assert_eq!(classify(at("12:20"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("11:59"), &hours), BusinessHoursStatus::Closed);
    }

    #[test]
    fn test_overnight_window_wraps_midnight() {
        let hours = BusinessHours::parse("22:00", "02:00").expect("valid window");
        assert!(hours.is_overnight());
        assert_eq!(classify(at("23:00"), &hours), BusinessHoursStatus::Open);
        assert_eq!(classify(at("00:30"), &hours), BusinessHoursStatus::Open);
        assert_eq!(classify(at("22:15"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("01:45"), &hours), BusinessHoursStatus::ClosingSoon);
        assert_eq!(classify(at("03:00"), &hours), BusinessHoursStatus::Closed);
        assert_eq!(classify(at("12:00"), &hours), BusinessHoursStatus::Closed);
        assert_eq!(classify(at("21:50"), &hours), BusinessHoursStatus::Closed);
    }

    #[test]
    fn test_classify_visit_uses_time_of_day() {
        let visit = civil::date(2024, 5, 1).at(17, 45, 0, 0);
        assert_eq!(
            classify_visit(visit, &nine_to_six()),
            BusinessHoursStatus::ClosingSoon
        );
    }

    #[test]
    fn test_clock_time_parsing() {
        assert_eq!(at("7:05").minutes(), 425);
        assert_eq!(at("23:59").to_string(), "23:59");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("12:5".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_business_hours_serde_uses_hh_mm() {
        let hours: BusinessHours =
            serde_json::from_str(r#"{"open":"08:30","close":"17:00"}"#).expect("deserialize");
        assert_eq!(hours.open, at("08:30"));
        let json = serde_json::to_string(&hours).expect("serialize");
        assert_eq!(json, r#"{"open":"08:30","close":"17:00"}"#);

        let bad: std::result::Result<BusinessHours, _> =
            serde_json::from_str(r#"{"open":"8am","close":"17:00"}"#);
        assert!(bad.is_err());
    }
}
