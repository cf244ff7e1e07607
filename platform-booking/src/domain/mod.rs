//! Domain types for platform booking.
//!
//! Value types that are validated at construction, so the booking engine can
//! trust every time, platform number and station identity it receives.

mod error;
mod platform;
mod station;
mod time;

pub use error::{BookingError, PlatformAlreadyExists};
pub use platform::{EventClass, PlatformId};
pub use station::{IdentityKind, InvalidStationIdentity, Line, StationIdentity};
pub use time::{BookingTime, TimeError};
