//! Directions retrieval.

use std::sync::Arc;

use tracing::debug;

use crate::cache::RouteKey;
use crate::domain::{Coordinate, RawRoute};
use crate::routes::RoutingProvider;

use super::Navigator;
use super::error::FetchError;

impl<P: RoutingProvider> Navigator<P> {
    /// Walking directions from `origin` to `destination`.
    ///
    /// Cached per ordered pair; the reverse trip is a separate entry.
    pub async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Arc<RawRoute>, FetchError> {
        let key = RouteKey::new(origin, destination);
        if let Some(hit) = self.cache.get_route(&key).await {
            debug!(%key, "route cache hit");
            return Ok(hit);
        }
        debug!(%key, "route cache miss");

        let provider = &self.provider;
        self.cache
            .route_or_try_insert(key, async move {
                let route = provider
                    .directions(origin, destination)
                    .await
                    .map_err(|e| FetchError::Provider(Arc::new(e)))?;
                debug!(
                    legs = route.legs.len(),
                    steps = route.step_count(),
                    "fetched route"
                );
                Ok(Arc::new(route))
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}
