//! Per-platform booking timelines.
//!
//! A platform keeps one timeline per event class. Each timeline holds its
//! accepted times in ascending order and guarantees that every pair of them is
//! at least the class threshold apart.

use chrono::Duration;
use tracing::{debug, trace};

use super::config::SeparationRules;
use crate::domain::{BookingError, BookingTime, EventClass, PlatformId};

/// Accepted times for one event class, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    times: Vec<BookingTime>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an existing booking strictly closer than `min_gap` to `time`.
    ///
    /// Since the stored times are pairwise separated, only the neighbours
    /// either side of the insertion point can be too close.
    pub fn find_conflict(&self, time: BookingTime, min_gap: Duration) -> Option<BookingTime> {
        let idx = self.times.partition_point(|t| *t < time);
        let after = self.times.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.times.get(i));

        [before, after]
            .into_iter()
            .flatten()
            .copied()
            .find(|t| t.distance(time) < min_gap)
    }

    /// Insert `time` unless it conflicts, in which case nothing changes and
    /// the conflicting booking is returned.
    pub fn try_book(&mut self, time: BookingTime, min_gap: Duration) -> Result<(), BookingTime> {
        if let Some(existing) = self.find_conflict(time, min_gap) {
            return Err(existing);
        }
        let idx = self.times.partition_point(|t| *t < time);
        self.times.insert(idx, time);
        Ok(())
    }

    /// Accepted times in ascending order.
    pub fn times(&self) -> &[BookingTime] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn contains(&self, time: BookingTime) -> bool {
        self.times.binary_search(&time).is_ok()
    }
}

/// A platform and its two independent booking timelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    id: PlatformId,
    rules: SeparationRules,
    stoppages: Timeline,
    through: Timeline,
}

impl Platform {
    /// Create an empty platform with the standard 30/10 minute rules.
    pub fn new(id: PlatformId) -> Self {
        Self::with_rules(id, SeparationRules::default())
    }

    pub fn with_rules(id: PlatformId, rules: SeparationRules) -> Self {
        Self {
            id,
            rules,
            stoppages: Timeline::new(),
            through: Timeline::new(),
        }
    }

    pub fn id(&self) -> PlatformId {
        self.id
    }

    pub fn rules(&self) -> SeparationRules {
        self.rules
    }

    /// Book a stoppage, rejecting it if another stoppage is within the
    /// stoppage threshold.
    pub fn try_book_stoppage(&mut self, time: BookingTime) -> Result<(), BookingError> {
        self.try_book(EventClass::Stoppage, time)
    }

    /// Book a through train, rejecting it if another through train is within
    /// the through threshold.
    pub fn try_book_through(&mut self, time: BookingTime) -> Result<(), BookingError> {
        self.try_book(EventClass::Through, time)
    }

    /// Book an event of the given class. A rejection leaves the platform
    /// untouched.
    pub fn try_book(&mut self, class: EventClass, time: BookingTime) -> Result<(), BookingError> {
        let min_gap = self.rules.threshold(class);
        let id = self.id;

        match self.timeline_mut(class).try_book(time, min_gap) {
            Ok(()) => {
                trace!(platform = %id, %class, time = %time.to_iso(), "booking accepted");
                Ok(())
            }
            Err(existing) => {
                debug!(
                    platform = %id,
                    %class,
                    time = %time.to_iso(),
                    conflicts_with = %existing.to_iso(),
                    "booking rejected"
                );
                Err(BookingError::SeparationViolation {
                    platform: id,
                    class,
                    threshold_mins: self.rules.threshold_mins(class),
                    conflicts_with: existing,
                })
            }
        }
    }

    /// The timeline for one event class.
    pub fn timeline(&self, class: EventClass) -> &Timeline {
        match class {
            EventClass::Stoppage => &self.stoppages,
            EventClass::Through => &self.through,
        }
    }

    fn timeline_mut(&mut self, class: EventClass) -> &mut Timeline {
        match class {
            EventClass::Stoppage => &mut self.stoppages,
            EventClass::Through => &mut self.through,
        }
    }

    pub fn stoppages(&self) -> &[BookingTime] {
        self.stoppages.times()
    }

    pub fn through(&self) -> &[BookingTime] {
        self.through.times()
    }
}
