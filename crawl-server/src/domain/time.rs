//! Wall-clock times for the crawl schedule.
//!
//! Start times arrive as "HH:MM" strings and arrival estimates are rendered
//! back in the same form. There is no date component: a crawl that runs past
//! midnight simply wraps around the clock.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use crawl_server::domain::ClockTime;
///
/// let time = ClockTime::parse("20:00").unwrap();
/// assert_eq!(time.add_minutes(75).to_string(), "21:15");
///
/// // Wraps past midnight
/// assert_eq!(time.add_minutes(300).to_string(), "01:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute components.
    ///
    /// Returns `None` if either component is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse("2000").is_err());
    /// assert!(ClockTime::parse("20:0").is_err());
    /// assert!(ClockTime::parse("24:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hours.len() != 2 || minutes.len() != 2 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("expected digits"));
        }

        let hour: u32 = hours
            .parse()
            .map_err(|_| TimeError::new("invalid hour"))?;
        let minute: u32 = minutes
            .parse()
            .map_err(|_| TimeError::new("invalid minute"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 00-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 00-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("time out of range"))
    }

    /// Returns this time shifted forward by `minutes`, wrapping modulo 24 hours.
    pub fn add_minutes(self, minutes: u32) -> Self {
        let wrapped = i64::from(minutes) % (24 * 60);
        Self(self.0 + Duration::minutes(wrapped))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
