//! Turn-by-turn banner text.

use crate::domain::{Coordinate, Waypoint};

/// Default search radius in degrees (roughly 100 m).
pub const DEFAULT_BANNER_RADIUS: f64 = 0.001;

/// Instruction of the waypoint nearest to `position`, within `radius`.
///
/// Distance is planar in degrees. Ties go to the earlier waypoint. A
/// non-finite position or waypoint is never in range.
pub fn banner_instruction(position: Coordinate, waypoints: &[Waypoint], radius: f64) -> Option<&str> {
    let mut nearest: Option<(f64, &Waypoint)> = None;

    for waypoint in waypoints {
        let distance = position.planar_distance(&waypoint.coordinate());
        if distance.is_nan() || distance > radius {
            continue;
        }
        match nearest {
            Some((best, _)) if distance >= best => {}
            _ => nearest = Some((distance, waypoint)),
        }
    }

    nearest.map(|(_, w)| w.instruction.as_str())
}
