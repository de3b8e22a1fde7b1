//! Mock routing provider for testing without API access.
//!
//! Serves canned matrix elements and routes, and counts how many requests
//! reach it so callers can check what the cache absorbed.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{CoordKey, Coordinate, RawRoute};

use super::error::RoutesError;
use super::provider::RoutingProvider;
use super::types::RouteMatrixElement;

/// Mock routing provider that serves pre-loaded responses.
#[derive(Debug, Clone, Default)]
pub struct MockRoutingProvider {
    matrix: Vec<RouteMatrixElement>,
    routes: HashMap<(CoordKey, CoordKey), RawRoute>,
    default_route: Option<RawRoute>,
    failure: Option<u16>,
    latency: Option<Duration>,
    matrix_calls: Arc<AtomicUsize>,
    directions_calls: Arc<AtomicUsize>,
}

impl MockRoutingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve one duration per destination, in destination order.
    pub fn with_durations(mut self, durations: &[&str]) -> Self {
        self.matrix = durations
            .iter()
            .enumerate()
            .map(|(i, d)| RouteMatrixElement::new(i, *d))
            .collect();
        self
    }

    /// Serve these matrix elements verbatim.
    pub fn with_matrix(mut self, elements: Vec<RouteMatrixElement>) -> Self {
        self.matrix = elements;
        self
    }

    /// Serve `route` for directions between exactly this pair.
    pub fn with_route(mut self, origin: Coordinate, destination: Coordinate, route: RawRoute) -> Self {
        self.routes.insert((origin.key(), destination.key()), route);
        self
    }

    /// Serve `route` for any pair without a specific route.
    pub fn with_default_route(mut self, route: RawRoute) -> Self {
        self.default_route = Some(route);
        self
    }

    /// Fail every request with this HTTP status.
    pub fn failing(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    /// Delay every response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of matrix requests received.
    pub fn matrix_calls(&self) -> usize {
        self.matrix_calls.load(Ordering::SeqCst)
    }

    /// Number of directions requests received.
    pub fn directions_calls(&self) -> usize {
        self.directions_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<(), RoutesError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure {
            Some(status) => Err(RoutesError::Api {
                status,
                reason: None,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl RoutingProvider for MockRoutingProvider {
    async fn travel_durations(
        &self,
        _origin: Coordinate,
        _destinations: &[Coordinate],
    ) -> Result<Vec<RouteMatrixElement>, RoutesError> {
        self.matrix_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(self.matrix.clone())
    }

    async fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RawRoute, RoutesError> {
        self.directions_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;

        self.routes
            .get(&(origin.key(), destination.key()))
            .or(self.default_route.as_ref())
            .cloned()
            .ok_or_else(|| RoutesError::Api {
                status: 404,
                reason: Some("NOT_FOUND".to_string()),
                message: format!("No mock route from {origin} to {destination}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteLeg, RouteStep};

    #[tokio::test]
    async fn serves_durations_in_order() {
        let mock = MockRoutingProvider::new().with_durations(&["60s", "30s"]);
        let elements = mock
            .travel_durations(Coordinate::new(0.0, 0.0), &[])
            .await
            .unwrap();

        assert_eq!(elements[1], RouteMatrixElement::new(1, "30s"));
        assert_eq!(mock.matrix_calls(), 1);
    }

    #[tokio::test]
    async fn specific_route_beats_default() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 1.0);
        let specific = RawRoute::new(vec![RouteLeg::new(vec![RouteStep::new("x", "y")])]);

        let mock = MockRoutingProvider::new()
            .with_route(a, b, specific.clone())
            .with_default_route(RawRoute::default());

        assert_eq!(mock.directions(a, b).await.unwrap(), specific);
        assert_eq!(mock.directions(b, a).await.unwrap(), RawRoute::default());
        assert_eq!(mock.directions_calls(), 2);
    }

    #[tokio::test]
    async fn unknown_route_returns_error() {
        let mock = MockRoutingProvider::new();
        let result = mock
            .directions(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))
            .await;

        assert!(matches!(result, Err(RoutesError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn failing_mock_counts_calls() {
        let mock = MockRoutingProvider::new()
            .with_durations(&["60s"])
            .failing(503);
        let clone = mock.clone();

        let result = clone.travel_durations(Coordinate::new(0.0, 0.0), &[]).await;

        assert!(matches!(result, Err(RoutesError::Api { status: 503, .. })));
        assert_eq!(mock.matrix_calls(), 1);
    }
}
