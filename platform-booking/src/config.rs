//! Service configuration loaded from environment variables.

use std::net::SocketAddr;

use chrono::{Duration, NaiveDate};

use crate::domain::{IdentityKind, InvalidStationIdentity, PlatformId, StationIdentity};
use crate::registry::StationHandle;
use crate::timeline::SeparationRules;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    /// The station identity could not be built
    #[error(transparent)]
    Identity(#[from] InvalidStationIdentity),

    /// The same platform ID was listed twice
    #[error("duplicate platform {0} in STATION_PLATFORMS")]
    DuplicatePlatform(PlatformId),
}

/// Everything needed to build and serve a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Identity of the served station.
    pub identity: StationIdentity,

    /// Lines registered at startup, in order.
    pub lines: Vec<String>,

    /// Platforms registered at startup.
    pub platforms: Vec<PlatformId>,

    /// Separation thresholds applied to every platform.
    pub rules: SeparationRules,

    /// Date given to bare "HH:MM" times. `None` means today's local date.
    pub service_date: Option<NaiveDate>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset keys take their defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BOOKING_BIND_ADDR") {
            Some(v) => parse_value("BOOKING_BIND_ADDR", &v)?,
            None => defaults.bind_addr,
        };

        let kind = match lookup("STATION_ID_KIND") {
            Some(v) => {
                let lowered = v.trim().to_ascii_lowercase();
                Some(match lowered.as_str() {
                    "integer" | "int" => IdentityKind::Integer,
                    "string" | "str" => IdentityKind::String,
                    _ => {
                        return Err(ConfigError::Invalid {
                            key: "STATION_ID_KIND",
                            value: v,
                        });
                    }
                })
            }
            None => None,
        };
        let identity = match lookup("STATION_ID") {
            Some(v) => StationIdentity::parse(&v, kind)?,
            None => defaults.identity,
        };

        let lines = match lookup("STATION_LINES") {
            Some(v) => split_list(&v).map(str::to_string).collect(),
            None => defaults.lines,
        };

        let platforms = match lookup("STATION_PLATFORMS") {
            Some(v) => {
                let mut ids = Vec::new();
                for item in split_list(&v) {
                    let id = PlatformId(parse_value("STATION_PLATFORMS", item)?);
                    if ids.contains(&id) {
                        return Err(ConfigError::DuplicatePlatform(id));
                    }
                    ids.push(id);
                }
                ids
            }
            None => defaults.platforms,
        };

        let stoppage_mins = match lookup("STOPPAGE_SEPARATION_MINS") {
            Some(v) => parse_minutes("STOPPAGE_SEPARATION_MINS", &v)?,
            None => defaults.rules.stoppage_mins,
        };
        let through_mins = match lookup("THROUGH_SEPARATION_MINS") {
            Some(v) => parse_minutes("THROUGH_SEPARATION_MINS", &v)?,
            None => defaults.rules.through_mins,
        };

        let service_date = match lookup("SERVICE_DATE") {
            Some(v) => Some(NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::Invalid {
                    key: "SERVICE_DATE",
                    value: v.clone(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            bind_addr,
            identity,
            lines,
            platforms,
            rules: SeparationRules::new(stoppage_mins, through_mins),
            service_date,
        })
    }

    /// Build the configured station with its lines and platforms.
    pub async fn build_station(&self) -> Result<StationHandle, ConfigError> {
        let station = StationHandle::with_rules(self.identity.clone(), self.rules);
        for line in &self.lines {
            station.add_line(line.clone()).await;
        }
        for id in &self.platforms {
            station
                .add_platform(*id)
                .await
                .map_err(|e| ConfigError::DuplicatePlatform(e.0))?;
        }
        Ok(station)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            identity: StationIdentity::Integer(1),
            lines: vec!["Blue Line".to_string(), "Yellow Line".to_string()],
            platforms: vec![PlatformId(1), PlatformId(2)],
            rules: SeparationRules::default(),
            service_date: None,
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

fn parse_minutes(key: &'static str, raw: &str) -> Result<i64, ConfigError> {
    let mins: i64 = parse_value(key, raw)?;
    if mins < 0 || Duration::try_minutes(mins).is_none() {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
        });
    }
    Ok(mins)
}
