//! Booking error types.
//!
//! A rejected booking is an expected outcome, not a defect. The two kinds are
//! kept distinct so callers can tell a bad platform number from a clash.

use super::{BookingTime, EventClass, PlatformId};

/// Why a booking was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// No platform with this ID exists on the station
    #[error("platform {0} not found")]
    UnknownPlatform(PlatformId),

    /// The requested time is too close to an existing booking of the same class
    #[error(
        "time conflict for {class} at platform {platform}: \
         within {threshold_mins} minutes of {conflicts_with}"
    )]
    SeparationViolation {
        platform: PlatformId,
        class: EventClass,
        threshold_mins: i64,
        conflicts_with: BookingTime,
    },
}

/// Returned when registering a platform ID the station already has.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("platform {0} already exists")]
pub struct PlatformAlreadyExists(pub PlatformId);
