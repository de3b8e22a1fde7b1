//! Flattening a provider route into drawable waypoints.
//!
//! The provider nests geometry as legs → steps → encoded polyline. The map
//! wants one flat list of points, each tagged with the instruction of the
//! step it came from, closed at both ends by the scenario's synthetic
//! endpoints so the drawn line meets the user and the target exactly.

use std::iter;

use tracing::{debug, warn};

use crate::domain::{Coordinate, RawRoute, RouteStep, Scenario, Waypoint};

/// Precision of the provider's encoded polylines (five decimal places).
pub const POLYLINE_PRECISION: u32 = 5;

/// Why a step contributed no waypoints.
#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error("step has no instruction")]
    MissingInstruction,

    #[error("step has no polyline")]
    MissingPolyline,

    #[error("polyline decode failed: {0}")]
    Decode(String),
}

/// Decode an encoded polyline into coordinates.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, String> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION).map_err(|e| e.to_string())?;
    Ok(line.coords().map(|c| Coordinate::new(c.y, c.x)).collect())
}

fn step_waypoints(step: &RouteStep) -> Result<Vec<Waypoint>, StepError> {
    let instruction = step
        .instruction
        .as_deref()
        .filter(|i| !i.is_empty())
        .ok_or(StepError::MissingInstruction)?;
    let encoded = step.polyline.as_deref().ok_or(StepError::MissingPolyline)?;
    let points = decode_polyline(encoded).map_err(StepError::Decode)?;

    Ok(points
        .into_iter()
        .map(|p| Waypoint::new(instruction, p))
        .collect())
}

/// Assemble every usable step of `route` into one waypoint sequence.
///
/// Steps are taken in provider order. A step without an instruction, or
/// whose geometry is missing or undecodable, is skipped. The result is
/// closed with `origin` at the head and the scenario's endpoint at the
/// tail. When no step yields a point the result is empty: there is no
/// route to draw.
pub fn assemble(route: &RawRoute, scenario: &Scenario, origin: Coordinate) -> Vec<Waypoint> {
    let mut per_step = Vec::with_capacity(route.step_count());

    for (leg_idx, leg) in route.legs.iter().enumerate() {
        for (step_idx, step) in leg.steps.iter().enumerate() {
            match step_waypoints(step) {
                Ok(points) => per_step.push(points),
                Err(StepError::MissingInstruction) => {
                    debug!(leg = leg_idx, step = step_idx, "skipping step without instruction");
                }
                Err(e) => {
                    warn!(leg = leg_idx, step = step_idx, error = %e, "skipping step");
                }
            }
        }
    }

    let waypoints: Vec<Waypoint> = per_step.into_iter().flatten().collect();
    close_route(waypoints, scenario, origin)
}

fn close_route(waypoints: Vec<Waypoint>, scenario: &Scenario, origin: Coordinate) -> Vec<Waypoint> {
    let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) else {
        return waypoints;
    };

    let head = Waypoint::new(scenario.head_instruction(&first.instruction), origin);
    let tail = Waypoint::new(last.instruction.clone(), scenario.endpoint());

    let mut closed = Vec::with_capacity(waypoints.len() + 2);
    closed.push(head);
    closed.extend(waypoints);
    closed.push(tail);
    closed
}

/// Assemble the route's geometry without instructions.
///
/// Uses the route's overview polyline, or the first step of the first leg
/// when the provider sent none, and closes it with the same endpoints as
/// [`assemble`].
pub fn assemble_geometry_only(
    route: &RawRoute,
    scenario: &Scenario,
    origin: Coordinate,
) -> Vec<Coordinate> {
    let encoded = route.polyline.as_deref().or_else(|| {
        route
            .legs
            .first()
            .and_then(|leg| leg.steps.first())
            .and_then(|step| step.polyline.as_deref())
    });

    let Some(encoded) = encoded else {
        debug!("route has no geometry");
        return Vec::new();
    };

    let points = match decode_polyline(encoded) {
        Ok(points) => points,
        Err(e) => {
            warn!(error = %e, "route geometry could not be decoded");
            return Vec::new();
        }
    };

    if points.is_empty() {
        return points;
    }

    iter::once(origin)
        .chain(points)
        .chain(iter::once(scenario.endpoint()))
        .collect()
}
