//! Platform identifiers and event classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of a platform, unique within its station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(pub u32);

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of platform use being booked.
///
/// Each class keeps its own timeline; a stoppage never conflicts with a
/// through train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventClass {
    /// A train stopping at the platform.
    Stoppage,
    /// A train passing the platform without stopping.
    Through,
}

impl EventClass {
    pub const ALL: [EventClass; 2] = [EventClass::Stoppage, EventClass::Through];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventClass::Stoppage => "stoppage",
            EventClass::Through => "through",
        }
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
