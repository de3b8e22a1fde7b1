//! The routing provider seam.

use std::future::Future;

use crate::domain::{Coordinate, RawRoute};

use super::error::RoutesError;
use super::types::RouteMatrixElement;

/// Source of walking durations and directions.
///
/// This abstraction allows the navigator to be tested with mock data.
pub trait RoutingProvider: Send + Sync {
    /// Walking durations from `origin` to every destination in one batch.
    ///
    /// Each element's `destination_index` refers back into `destinations`.
    fn travel_durations(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
    ) -> impl Future<Output = Result<Vec<RouteMatrixElement>, RoutesError>> + Send;

    /// Walking directions from `origin` to `destination`.
    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<RawRoute, RoutesError>> + Send;
}
