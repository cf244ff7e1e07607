//! Station identity and line types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a station identity cannot be built from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station identity: {reason}")]
pub struct InvalidStationIdentity {
    reason: &'static str,
}

/// Which variant of [`StationIdentity`] to build when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Integer,
    String,
}

/// How a station is identified: by number or by name, never both.
///
/// The identity is fixed when the station is created and is otherwise inert.
///
/// # Examples
///
/// ```
/// use platform_booking::domain::StationIdentity;
///
/// let id = StationIdentity::Integer(42);
/// assert_eq!(id.describe(), "Station ID (Integer): 42");
///
/// let id = StationIdentity::Name("Central".into());
/// assert_eq!(id.describe(), "Station ID (String): Central");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StationIdentity {
    Integer(i64),
    Name(String),
}

impl StationIdentity {
    /// Build an identity from configuration text.
    ///
    /// With no `kind`, text that parses as an integer becomes `Integer` and
    /// anything else becomes `Name`.
    pub fn parse(raw: &str, kind: Option<IdentityKind>) -> Result<Self, InvalidStationIdentity> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InvalidStationIdentity {
                reason: "must not be empty",
            });
        }

        match kind {
            Some(IdentityKind::Integer) => {
                raw.parse()
                    .map(StationIdentity::Integer)
                    .map_err(|_| InvalidStationIdentity {
                        reason: "expected an integer",
                    })
            }
            Some(IdentityKind::String) => Ok(StationIdentity::Name(raw.to_string())),
            None => Ok(raw
                .parse()
                .map(StationIdentity::Integer)
                .unwrap_or_else(|_| StationIdentity::Name(raw.to_string()))),
        }
    }

    /// The variant this identity was built as.
    pub fn kind(&self) -> IdentityKind {
        match self {
            StationIdentity::Integer(_) => IdentityKind::Integer,
            StationIdentity::Name(_) => IdentityKind::String,
        }
    }

    /// Human-readable label tagged with the identity kind.
    pub fn describe(&self) -> String {
        match self {
            StationIdentity::Integer(n) => format!("Station ID (Integer): {n}"),
            StationIdentity::Name(s) => format!("Station ID (String): {s}"),
        }
    }
}

impl fmt::Display for StationIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationIdentity::Integer(n) => write!(f, "{n}"),
            StationIdentity::Name(s) => f.write_str(s),
        }
    }
}

/// A named line serving a station. Purely descriptive; names may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub name: String,
}

impl Line {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
