//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BookingError, EventClass, IdentityKind, PlatformId};
use crate::timeline::Platform;

/// Request to add a line to the station.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddLineRequest {
    /// Line name, e.g. "Blue Line"
    pub name: String,
}

/// Request to register a platform.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddPlatformRequest {
    /// Platform number, unique within the station
    pub id: PlatformId,
}

/// Request to book a platform.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Stoppage or through
    pub class: EventClass,

    /// "HH:MM[:SS]" on the service date, or "YYYY-MM-DDTHH:MM[:SS]"
    pub time: String,
}

/// An accepted booking.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub platform: PlatformId,
    pub class: EventClass,
    /// Full timestamp of the accepted booking
    pub time: String,
}

/// Details returned when a booking clashes with an existing one.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictResponse {
    pub error: String,
    pub platform: PlatformId,
    pub class: EventClass,
    pub threshold_mins: i64,
    /// Full timestamp of the booking that blocks the request
    pub conflicts_with: String,
}

/// A platform and its bookings.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlatformResponse {
    pub id: PlatformId,
    pub stoppages: Vec<String>,
    pub through: Vec<String>,
}

/// The whole station.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationResponse {
    /// e.g. "Station ID (Integer): 42"
    pub identity: String,
    pub identity_kind: IdentityKind,
    pub lines: Vec<String>,
    pub platforms: Vec<PlatformResponse>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Platform> for PlatformResponse {
    fn from(platform: &Platform) -> Self {
        Self {
            id: platform.id(),
            stoppages: platform.stoppages().iter().map(|t| t.to_iso()).collect(),
            through: platform.through().iter().map(|t| t.to_iso()).collect(),
        }
    }
}

impl ConflictResponse {
    /// Build from a separation violation. Returns `None` for other errors.
    pub fn from_error(err: &BookingError) -> Option<Self> {
        match err {
            BookingError::SeparationViolation {
                platform,
                class,
                threshold_mins,
                conflicts_with,
            } => Some(Self {
                error: err.to_string(),
                platform: *platform,
                class: *class,
                threshold_mins: *threshold_mins,
                conflicts_with: conflicts_with.to_iso(),
            }),
            BookingError::UnknownPlatform(_) => None,
        }
    }
}
