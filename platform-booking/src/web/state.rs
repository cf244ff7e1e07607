//! Application state for the web layer.

use chrono::{Local, NaiveDate};

use crate::registry::StationHandle;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The station served by this process
    pub station: StationHandle,

    /// Date for bare "HH:MM" times; today's local date when unset
    pub service_date: Option<NaiveDate>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(station: StationHandle, service_date: Option<NaiveDate>) -> Self {
        Self {
            station,
            service_date,
        }
    }

    /// The date bare times are placed on for the current request.
    pub fn service_date(&self) -> NaiveDate {
        self.service_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
