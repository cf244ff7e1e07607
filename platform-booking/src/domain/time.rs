//! Booking time handling.
//!
//! Callers supply times either as a bare "HH:MM" / "HH:MM:SS" on a service
//! date, or as a full "YYYY-MM-DDTHH:MM[:SS]" timestamp. Separation between
//! bookings is measured in whole seconds, so the type keeps second resolution.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
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

/// A date-aware point in time at which a train uses a platform.
///
/// # Examples
///
/// ```
/// use platform_booking::domain::BookingTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = BookingTime::parse_hhmm("08:30", date).unwrap();
/// assert_eq!(time.to_string(), "08:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingTime(NaiveDateTime);

impl BookingTime {
    /// Create a new BookingTime from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    /// Parse a time of day on the given date.
    ///
    /// Accepts "HH:MM" and "HH:MM:SS", both zero-padded.
    ///
    /// ```
    /// use platform_booking::domain::BookingTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(BookingTime::parse_hhmm("00:00", date).is_ok());
    /// assert!(BookingTime::parse_hhmm("08:29:59", date).is_ok());
    ///
    /// assert!(BookingTime::parse_hhmm("0830", date).is_err());
    /// assert!(BookingTime::parse_hhmm("24:00", date).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS"));
        }
        if bytes[2] != b':' || (bytes.len() == 8 && bytes[5] != b':') {
            return Err(TimeError::new("expected colon separators"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?
        } else {
            0
        };
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self::new(date, time))
    }

    /// Parse either a bare time of day (placed on `default_date`) or a full
    /// date and time separated by `T` or a space.
    pub fn parse(s: &str, default_date: NaiveDate) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.len() <= 8 {
            return Self::parse_hhmm(s, default_date);
        }

        let (date_part, time_part) = s
            .split_once(['T', ' '])
            .ok_or_else(|| TimeError::new("expected date and time separated by 'T'"))?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|_| TimeError::new("date must be YYYY-MM-DD"))?;

        Self::parse_hhmm(time_part, date)
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Absolute distance between two times. Never negative.
    ///
    /// ```
    /// use platform_booking::domain::BookingTime;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let a = BookingTime::parse_hhmm("08:00", date).unwrap();
    /// let b = BookingTime::parse_hhmm("08:20", date).unwrap();
    /// assert_eq!(a.distance(b), Duration::minutes(20));
    /// assert_eq!(b.distance(a), Duration::minutes(20));
    /// ```
    pub fn distance(&self, other: Self) -> Duration {
        self.0.signed_duration_since(other.0).abs()
    }

    /// Add a duration to this time, crossing midnight where needed.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Full timestamp in "YYYY-MM-DDTHH:MM:SS" form.
    pub fn to_iso(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Debug for BookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookingTime({})", self.to_iso())
    }
}

impl fmt::Display for BookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.time();
        if t.second() == 0 {
            write!(f, "{:02}:{:02}", t.hour(), t.minute())
        } else {
            write!(f, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
        }
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
