//! Resolve, fetch and assemble.
//!
//! This module implements the pipeline that answers: "where is the nearest
//! AED, and how do I walk there?"
//!
//! 1. The nearest active facility is picked by walking duration, using one
//!    batched matrix request.
//! 2. Walking directions to the chosen endpoint are fetched.
//! 3. The route's legs and steps are flattened into waypoints and closed
//!    with the scenario's endpoints.
//!
//! Both provider lookups are memoized in an injected [`RouteCache`].

mod assemble;
mod banner;
mod duration;
mod error;
mod fetch;
mod resolve;


use std::sync::Arc;

use tracing::info;

use crate::cache::RouteCache;
use crate::domain::{Coordinate, Facility, Scenario, Waypoint};
use crate::routes::RoutingProvider;

pub use assemble::{POLYLINE_PRECISION, assemble, assemble_geometry_only, decode_polyline};
pub use banner::{DEFAULT_BANNER_RADIUS, banner_instruction};
pub use duration::{format_minutes, parse_duration_secs};
pub use error::{CONNECTIVITY_MESSAGE, FetchError, NavigationError, ResolutionError};
pub use resolve::{NearestFacility, select_closest};

/// Where a navigation should lead.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// The nearest active facility among these candidates.
    NearestFacility(Vec<Facility>),
    /// Back to the recorded incident location.
    Incident(Coordinate),
    /// To the stairs or lift.
    Stairs(Coordinate),
}

/// Result of a navigation.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub scenario: Scenario,
    /// Set when the destination was resolved to a facility.
    pub facility: Option<NearestFacility>,
    /// Walking time to the facility in whole minutes, `"0"` when unknown.
    pub minutes: String,
    pub waypoints: Vec<Waypoint>,
    pub path: Vec<Coordinate>,
}

impl Navigation {
    /// Whether there is anything to draw.
    pub fn is_drawable(&self) -> bool {
        !self.waypoints.is_empty()
    }
}

/// Navigation pipeline over a routing provider.
pub struct Navigator<P> {
    provider: P,
    cache: Arc<RouteCache>,
}

impl<P: RoutingProvider> Navigator<P> {
    /// Create a navigator that memoizes into `cache`.
    pub fn new(provider: P, cache: Arc<RouteCache>) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    /// Run the full pipeline from `origin` to `destination`.
    pub async fn navigate(
        &self,
        origin: Coordinate,
        destination: Destination,
    ) -> Result<Navigation, NavigationError> {
        let (facility, scenario) = match destination {
            Destination::NearestFacility(candidates) => {
                let nearest = self.resolve_closest(origin, &candidates).await?;
                let scenario = Scenario::ToFacility {
                    facility: nearest.coordinate(),
                };
                (Some(nearest), scenario)
            }
            Destination::Incident(incident) => (None, Scenario::BackToIncident { incident }),
            Destination::Stairs(target) => (None, Scenario::ToStairs { target }),
        };

        let route = self.fetch_route(origin, scenario.endpoint()).await?;
        let waypoints = assemble(&route, &scenario, origin);
        let path = assemble_geometry_only(&route, &scenario, origin);

        if waypoints.is_empty() {
            info!(%origin, endpoint = %scenario.endpoint(), "no drawable route");
        }

        let minutes = format_minutes(facility.as_ref().map(|f| f.duration_text.as_str()));

        Ok(Navigation {
            scenario,
            facility,
            minutes,
            waypoints,
            path,
        })
    }
}
