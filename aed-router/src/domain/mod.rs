//! Domain types for AED routing.
//!
//! Coordinates, facilities and the two route shapes: the nested route the
//! provider returns and the flat waypoint list the map draws.

mod coordinate;
mod facility;
mod route;

pub use coordinate::{CoordKey, Coordinate};
pub use facility::{Facility, FacilitySnapshot, SnapshotError};
pub use route::{RawRoute, RouteLeg, RouteStep, STAIRS_INSTRUCTION, Scenario, Waypoint};
