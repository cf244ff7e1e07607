//! Thread-safe station handle for concurrent callers.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::station::Station;
use crate::domain::{
    BookingError, BookingTime, EventClass, Line, PlatformAlreadyExists, PlatformId,
    StationIdentity,
};
use crate::timeline::{Platform, SeparationRules};

type PlatformMap = BTreeMap<PlatformId, Arc<Mutex<Platform>>>;

/// Shared handle to a station.
///
/// Each platform sits behind its own lock, so the separation check and the
/// insert happen as one step per platform while bookings on different
/// platforms proceed in parallel.
#[derive(Clone)]
pub struct StationHandle {
    identity: Arc<StationIdentity>,
    rules: SeparationRules,
    lines: Arc<RwLock<Vec<Line>>>,
    platforms: Arc<RwLock<PlatformMap>>,
}

impl StationHandle {
    /// Create an empty station with the standard rules.
    pub fn new(identity: StationIdentity) -> Self {
        Self::with_rules(identity, SeparationRules::default())
    }

    pub fn with_rules(identity: StationIdentity, rules: SeparationRules) -> Self {
        Self {
            identity: Arc::new(identity),
            rules,
            lines: Arc::new(RwLock::new(Vec::new())),
            platforms: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn identity(&self) -> &StationIdentity {
        &self.identity
    }

    pub fn describe_identity(&self) -> String {
        self.identity.describe()
    }

    pub fn rules(&self) -> SeparationRules {
        self.rules
    }

    /// Append a line. Names are not deduplicated.
    pub async fn add_line(&self, name: impl Into<String>) {
        let line = Line::new(name);
        debug!(station = %self.identity, line = %line.name, "line added");
        self.lines.write().await.push(line);
    }

    pub async fn lines(&self) -> Vec<Line> {
        self.lines.read().await.clone()
    }

    /// Register an empty platform. Fails if the ID is already taken.
    pub async fn add_platform(&self, id: PlatformId) -> Result<(), PlatformAlreadyExists> {
        let mut guard = self.platforms.write().await;
        if guard.contains_key(&id) {
            return Err(PlatformAlreadyExists(id));
        }
        guard.insert(id, Arc::new(Mutex::new(Platform::with_rules(id, self.rules))));
        info!(station = %self.identity, platform = %id, "platform added");
        Ok(())
    }

    pub async fn platform_ids(&self) -> Vec<PlatformId> {
        self.platforms.read().await.keys().copied().collect()
    }

    /// A copy of one platform's current state.
    pub async fn platform(&self, id: PlatformId) -> Option<Platform> {
        let platform = self.platforms.read().await.get(&id).cloned()?;
        let guard = platform.lock().await;
        Some(guard.clone())
    }

    pub async fn book_stoppage(
        &self,
        platform: PlatformId,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        self.book(platform, EventClass::Stoppage, time).await
    }

    pub async fn book_through(
        &self,
        platform: PlatformId,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        self.book(platform, EventClass::Through, time).await
    }

    /// Route a booking to the platform with the given ID.
    pub async fn book(
        &self,
        platform: PlatformId,
        class: EventClass,
        time: BookingTime,
    ) -> Result<(), BookingError> {
        // Release the map lock before waiting on the platform
        let target = self.platforms.read().await.get(&platform).cloned();
        let Some(target) = target else {
            debug!(station = %self.identity, %platform, "booking for unknown platform");
            return Err(BookingError::UnknownPlatform(platform));
        };

        let mut guard = target.lock().await;
        guard.try_book(class, time)
    }

    /// A point-in-time copy of the whole station.
    pub async fn snapshot(&self) -> Station {
        let mut station = Station::with_rules((*self.identity).clone(), self.rules);
        for line in self.lines.read().await.iter() {
            station.add_line(line.name.clone());
        }

        let platforms = self.platforms.read().await;
        for platform in platforms.values() {
            station.insert_platform(platform.lock().await.clone());
        }
        station
    }
}

impl From<Station> for StationHandle {
    fn from(station: Station) -> Self {
        let lines = station.lines().to_vec();
        let platforms: PlatformMap = station
            .platforms()
            .map(|p| (p.id(), Arc::new(Mutex::new(p.clone()))))
            .collect();

        Self {
            identity: Arc::new(station.identity().clone()),
            rules: station.rules(),
            lines: Arc::new(RwLock::new(lines)),
            platforms: Arc::new(RwLock::new(platforms)),
        }
    }
}
