//! Minimum-separation rules for platform bookings.

use chrono::Duration;

use crate::domain::EventClass;

/// Minimum gap between two bookings of the same class on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparationRules {
    /// Minimum gap between stoppages (minutes).
    pub stoppage_mins: i64,

    /// Minimum gap between through trains (minutes).
    pub through_mins: i64,
}

impl SeparationRules {
    /// Create rules with the given thresholds.
    pub fn new(stoppage_mins: i64, through_mins: i64) -> Self {
        Self {
            stoppage_mins,
            through_mins,
        }
    }

    /// Threshold for a class, in minutes.
    pub fn threshold_mins(&self, class: EventClass) -> i64 {
        match class {
            EventClass::Stoppage => self.stoppage_mins,
            EventClass::Through => self.through_mins,
        }
    }

    /// Threshold for a class as a Duration. Values too large to represent
    /// saturate, so every pair of bookings conflicts.
    pub fn threshold(&self, class: EventClass) -> Duration {
        Duration::try_minutes(self.threshold_mins(class)).unwrap_or(Duration::MAX)
    }
}

impl Default for SeparationRules {
    fn default() -> Self {
        Self {
            stoppage_mins: 30,
            through_mins: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules() {
        let rules = SeparationRules::default();
        assert_eq!(rules.stoppage_mins, 30);
        assert_eq!(rules.through_mins, 10);
    }

    #[test]
    fn threshold_per_class() {
        let rules = SeparationRules::default();
        assert_eq!(rules.threshold(EventClass::Stoppage), Duration::minutes(30));
        assert_eq!(rules.threshold(EventClass::Through), Duration::minutes(10));
    }

    #[test]
    fn oversized_threshold_saturates() {
        let rules = SeparationRules::new(200_000_000_000_000, 10);
        assert_eq!(rules.threshold(EventClass::Stoppage), Duration::MAX);
        assert_eq!(rules.threshold(EventClass::Through), Duration::minutes(10));
    }

    #[test]
    fn custom_rules() {
        let rules = SeparationRules::new(45, 5);
        assert_eq!(rules.threshold_mins(EventClass::Stoppage), 45);
        assert_eq!(rules.threshold_mins(EventClass::Through), 5);
    }
}
