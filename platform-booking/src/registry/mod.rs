//! Station registry.
//!
//! Owns a station's lines and platforms and routes booking requests to the
//! platform with the matching ID. [`Station`] is the plain single-threaded
//! registry; [`StationHandle`] shares one between concurrent callers.

mod shared;
mod station;

pub use shared::StationHandle;
pub use station::Station;
