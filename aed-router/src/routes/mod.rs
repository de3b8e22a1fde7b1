//! Routing provider client.
//!
//! This module provides an HTTP client for a Google-Routes-compatible
//! walking-directions API, plus the [`RoutingProvider`] trait the navigator
//! is generic over.
//!
//! Two endpoints are used:
//! - `computeRouteMatrix` returns one travel duration per destination for
//!   a single origin, which is how the nearest AED is picked
//! - `computeRoutes` returns the legs and steps of a walking route, each
//!   step carrying an instruction and an encoded polyline
//!
//! Both requests send a field mask so the provider returns only what the
//! pipeline reads.

mod client;
mod error;
#[cfg(test)]
mod mock;
mod provider;
mod types;

pub use client::{RoutesClient, RoutesConfig};
pub use error::RoutesError;
#[cfg(test)]
pub use mock::MockRoutingProvider;
pub use provider::RoutingProvider;
pub use types::{
    ComputeRoutesRequest, ComputeRoutesResponse, DIRECTIONS_FIELD_MASK, MATRIX_FIELD_MASK,
    RouteMatrixElement, RouteMatrixRequest,
};
