//! Memoization of provider lookups.
//!
//! Two independent stores: nearest-facility results keyed by origin and
//! candidate set, and raw routes keyed by the ordered origin/destination
//! pair. Entries never expire and are never evicted; facility sets and
//! walking routes do not change within a response session.
//!
//! Misses go through [`RouteCache::facility_or_try_insert`] and
//! [`RouteCache::route_or_try_insert`], which coalesce concurrent callers
//! on the same key into a single initialisation and only store successful
//! results.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use moka::future::Cache as MokaCache;

use crate::domain::{CoordKey, Coordinate, Facility, RawRoute};
use crate::navigator::NearestFacility;

/// Cache key for nearest-facility lookups.
///
/// Candidates are sorted, so any ordering of the same set maps to the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacilityKey {
    origin: CoordKey,
    candidates: Vec<(CoordKey, String)>,
}

impl FacilityKey {
    pub fn new(origin: Coordinate, candidates: &[Facility]) -> Self {
        let mut candidates: Vec<_> = candidates
            .iter()
            .map(|f| (f.coordinate().key(), f.name.clone()))
            .collect();
        candidates.sort_unstable();

        Self {
            origin: origin.key(),
            candidates,
        }
    }
}

impl fmt::Display for FacilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|", self.origin)?;
        for (i, (coord, name)) in self.candidates.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{name}@{coord}")?;
        }
        Ok(())
    }
}

/// Cache key for directions: (origin, destination), order-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteKey {
    origin: CoordKey,
    destination: CoordKey,
}

impl RouteKey {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin: origin.key(),
            destination: destination.key(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Initial capacity of each store.
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}

/// Process-lifetime memo of nearest-facility results and routes.
pub struct RouteCache {
    facilities: MokaCache<FacilityKey, NearestFacility>,
    routes: MokaCache<RouteKey, Arc<RawRoute>>,
}

impl RouteCache {
    /// Create an empty cache.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            facilities: MokaCache::builder()
                .initial_capacity(config.initial_capacity)
                .build(),
            routes: MokaCache::builder()
                .initial_capacity(config.initial_capacity)
                .build(),
        }
    }

    pub async fn get_facility(&self, key: &FacilityKey) -> Option<NearestFacility> {
        self.facilities.get(key).await
    }

    pub async fn insert_facility(&self, key: FacilityKey, value: NearestFacility) {
        self.facilities.insert(key, value).await;
    }

    /// Return the cached facility for `key`, or run `init` to produce it.
    ///
    /// Concurrent callers with an equal key share one `init`. An `Err` is
    /// handed to every waiter and nothing is stored.
    pub async fn facility_or_try_insert<F, E>(
        &self,
        key: FacilityKey,
        init: F,
    ) -> Result<NearestFacility, Arc<E>>
    where
        F: Future<Output = Result<NearestFacility, E>>,
        E: Send + Sync + 'static,
    {
        self.facilities.try_get_with(key, init).await
    }

    pub async fn get_route(&self, key: &RouteKey) -> Option<Arc<RawRoute>> {
        self.routes.get(key).await
    }

    pub async fn insert_route(&self, key: RouteKey, route: Arc<RawRoute>) {
        self.routes.insert(key, route).await;
    }

    /// Route counterpart of [`RouteCache::facility_or_try_insert`].
    pub async fn route_or_try_insert<F, E>(
        &self,
        key: RouteKey,
        init: F,
    ) -> Result<Arc<RawRoute>, Arc<E>>
    where
        F: Future<Output = Result<Arc<RawRoute>, E>>,
        E: Send + Sync + 'static,
    {
        self.routes.try_get_with(key, init).await
    }

    /// Number of cached facility results.
    ///
    /// Counts are eventually consistent; call
    /// [`RouteCache::run_pending_tasks`] first for an exact figure.
    pub fn facility_count(&self) -> u64 {
        self.facilities.entry_count()
    }

    /// Number of cached routes.
    pub fn route_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Flush moka's pending bookkeeping so counts are exact.
    pub async fn run_pending_tasks(&self) {
        self.facilities.run_pending_tasks().await;
        self.routes.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.facilities.invalidate_all();
        self.routes.invalidate_all();
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
