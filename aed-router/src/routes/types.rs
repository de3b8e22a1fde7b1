//! Routing provider request and response DTOs.
//!
//! These map directly to the provider's JSON API. The provider omits
//! default-valued fields (including zero indices), so most response fields
//! are optional or defaulted.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RawRoute, RouteLeg, RouteStep};

/// Travel mode sent with every request.
pub const TRAVEL_MODE_WALK: &str = "WALK";

/// Field mask for route matrix requests.
pub const MATRIX_FIELD_MASK: &str = "duration,originIndex,destinationIndex";

/// Field mask for directions requests.
pub const DIRECTIONS_FIELD_MASK: &str = "routes.legs.steps.navigationInstruction.instructions,\
routes.legs.steps.polyline.encodedPolyline,routes.polyline.encodedPolyline";

#[derive(Debug, Clone, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat_lng: LatLng,
}

/// A request waypoint: `{"location": {"latLng": {...}}}`.
#[derive(Debug, Clone, Serialize)]
pub struct LocationWaypoint {
    pub location: Location,
}

impl From<Coordinate> for LocationWaypoint {
    fn from(c: Coordinate) -> Self {
        Self {
            location: Location {
                lat_lng: LatLng {
                    latitude: c.latitude,
                    longitude: c.longitude,
                },
            },
        }
    }
}

/// Matrix origins and destinations wrap the waypoint one level deeper.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixWaypoint {
    pub waypoint: LocationWaypoint,
}

impl From<Coordinate> for MatrixWaypoint {
    fn from(c: Coordinate) -> Self {
        Self { waypoint: c.into() }
    }
}

/// Body of `computeRouteMatrix`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatrixRequest {
    pub origins: Vec<MatrixWaypoint>,
    pub destinations: Vec<MatrixWaypoint>,
    pub travel_mode: &'static str,
    pub language_code: String,
    pub units: String,
}

/// Body of `computeRoutes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: LocationWaypoint,
    pub destination: LocationWaypoint,
    pub travel_mode: &'static str,
    pub language_code: String,
    pub units: String,
}

/// One origin/destination cell of a route matrix response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatrixElement {
    #[serde(default)]
    pub origin_index: usize,

    /// Index into the request's destination list.
    #[serde(default)]
    pub destination_index: usize,

    /// Travel time such as `"725s"`. Missing when no route exists.
    pub duration: Option<String>,
}

impl RouteMatrixElement {
    pub fn new(destination_index: usize, duration: impl Into<String>) -> Self {
        Self {
            origin_index: 0,
            destination_index,
            duration: Some(duration.into()),
        }
    }

    /// An element for a destination the provider could not reach.
    pub fn unreachable(destination_index: usize) -> Self {
        Self {
            origin_index: 0,
            destination_index,
            duration: None,
        }
    }
}

/// Response of `computeRoutes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputeRoutesResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

impl ComputeRoutesResponse {
    /// Convert the first returned route.
    ///
    /// An empty response becomes an empty route.
    pub fn into_raw_route(self) -> RawRoute {
        self.routes
            .into_iter()
            .next()
            .map(RawRoute::from)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteDto {
    #[serde(default)]
    pub legs: Vec<LegDto>,
    pub polyline: Option<PolylineDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegDto {
    #[serde(default)]
    pub steps: Vec<StepDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDto {
    pub navigation_instruction: Option<NavigationInstructionDto>,
    pub polyline: Option<PolylineDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationInstructionDto {
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolylineDto {
    pub encoded_polyline: Option<String>,
}

/// Error body the provider sends with non-success statuses:
/// `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl From<RouteDto> for RawRoute {
    fn from(dto: RouteDto) -> Self {
        RawRoute {
            legs: dto.legs.into_iter().map(RouteLeg::from).collect(),
            polyline: dto.polyline.and_then(|p| p.encoded_polyline),
        }
    }
}

impl From<LegDto> for RouteLeg {
    fn from(dto: LegDto) -> Self {
        RouteLeg {
            steps: dto.steps.into_iter().map(RouteStep::from).collect(),
        }
    }
}

impl From<StepDto> for RouteStep {
    fn from(dto: StepDto) -> Self {
        RouteStep {
            instruction: dto.navigation_instruction.and_then(|n| n.instructions),
            polyline: dto.polyline.and_then(|p| p.encoded_polyline),
        }
    }
}
