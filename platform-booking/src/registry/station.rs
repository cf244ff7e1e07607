//! Single-threaded station registry.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::{
    BookingError, BookingTime, EventClass, Line, PlatformAlreadyExists, PlatformId,
    StationIdentity,
};
use crate::timeline::{Platform, SeparationRules};

/// A station: its identity, the lines serving it and its platforms.
///
/// Booking requests are routed to the platform with the matching ID.
///
/// # Examples
///
/// ```
/// use platform_booking::domain::{BookingError, BookingTime, PlatformId, StationIdentity};
/// use platform_booking::registry::Station;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let at = |s| BookingTime::parse_hhmm(s, date).unwrap();
///
/// let mut station = Station::new(StationIdentity::Integer(7));
/// station.add_platform(PlatformId(1)).unwrap();
///
/// assert!(station.book_stoppage(PlatformId(1), at("08:00")).is_ok());
/// assert!(station.book_stoppage(PlatformId(1), at("08:20")).is_err());
/// assert!(station.book_stoppage(PlatformId(1), at("08:30")).is_ok());
/// assert_eq!(
///     station.book_through(PlatformId(99), at("08:00")),
///     Err(BookingError::UnknownPlatform(PlatformId(99)))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Station {
    identity: StationIdentity,
    rules: SeparationRules,
    lines: Vec<Line>,
    platforms: BTreeMap<PlatformId, Platform>,
}

impl Station {
    /// Create a station with no lines or platforms and the standard rules.
    pub fn new(identity: StationIdentity) -> Self {
        Self::with_rules(identity, SeparationRules::default())
    }

    /// Create a station whose platforms use the given separation rules.
    pub fn with_rules(identity: StationIdentity, rules: SeparationRules) -> Self {
        Self {
            identity,
            rules,
            lines: Vec::new(),
            platforms: BTreeMap::new(),
        }
    }

    pub fn identity(&self) -> &StationIdentity {
        &self.identity
    }

    pub fn describe_identity(&self) -> String {
        self.identity.describe()
    }

    pub fn rules(&self) -> SeparationRules {
        self.rules
    }

    /// Append a line. Names are not deduplicated.
    pub fn add_line(&mut self, name: impl Into<String>) {
        let line = Line::new(name);
        debug!(station = %self.identity, line = %line.name, "line added");
        self.lines.push(line);
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Register an empty platform. Fails if the ID is already taken, leaving
    /// the existing platform and its bookings untouched.
    pub fn add_platform(&mut self, id: PlatformId) -> Result<(), PlatformAlreadyExists> {
        if self.platforms.contains_key(&id) {
            return Err(PlatformAlreadyExists(id));
        }
        self.platforms.insert(id, Platform::with_rules(id, self.rules));
        info!(station = %self.identity, platform = %id, "platform added");
        Ok(())
    }

    /// Place an already-populated platform, replacing any with the same ID.
    pub(crate) fn insert_platform(&mut self, platform: Platform) {
        self.platforms.insert(platform.id(), platform);
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(&id)
    }

    /// Platforms in ascending ID order.
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.values()
    }

    pub fn book_stoppage(
        &mut self,
        platform: PlatformId,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        self.book(platform, EventClass::Stoppage, time)
    }

    pub fn book_through(
        &mut self,
        platform: PlatformId,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        self.book(platform, EventClass::Through, time)
    }

    /// Route a booking to the platform with the given ID.
    pub fn book(
        &mut self,
        platform: PlatformId,
        class: EventClass,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        let Some(target) = self.platforms.get_mut(&platform) else {
            debug!(station = %self.identity, %platform, "booking for unknown platform");
            return Err(BookingError::UnknownPlatform(platform));
        };
        target.try_book(class, time)
    }
}
