//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Facility, Waypoint};
use crate::navigator::{Destination, Navigation, NearestFacility};

/// Request to navigate from the user's position.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// Current position of the user
    pub origin: Coordinate,

    /// Where to walk to
    pub destination: DestinationRequest,
}

/// Navigation target.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationRequest {
    /// Nearest active AED. Uses the loaded snapshot when `facilities` is
    /// omitted.
    NearestFacility {
        #[serde(default)]
        facilities: Option<Vec<Facility>>,
    },

    /// Back to the incident
    Incident { incident: Coordinate },

    /// To the stairs or lift
    Stairs { target: Coordinate },
}

impl DestinationRequest {
    /// Resolve into a pipeline destination, falling back to `snapshot`.
    pub fn into_destination(self, snapshot: &[Facility]) -> Destination {
        match self {
            DestinationRequest::NearestFacility { facilities } => {
                Destination::NearestFacility(facilities.unwrap_or_else(|| snapshot.to_vec()))
            }
            DestinationRequest::Incident { incident } => Destination::Incident(incident),
            DestinationRequest::Stairs { target } => Destination::Stairs(target),
        }
    }
}

/// The facility a navigation resolved to.
#[derive(Debug, Serialize)]
pub struct FacilityResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Provider duration text, e.g. "725s"
    pub duration: String,
}

impl FacilityResult {
    pub fn from_nearest(nearest: &NearestFacility) -> Self {
        Self {
            name: nearest.facility.name.clone(),
            latitude: nearest.facility.latitude,
            longitude: nearest.facility.longitude,
            duration: nearest.duration_text.clone(),
        }
    }
}

/// Response for navigation.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    /// Resolved facility, for nearest-facility navigations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<FacilityResult>,

    /// Walking time in whole minutes
    pub minutes: String,

    /// Whether there is a route to draw
    pub drawable: bool,

    /// Instruction-tagged points
    pub waypoints: Vec<Waypoint>,

    /// Bare route geometry
    pub path: Vec<Coordinate>,
}

impl NavigateResponse {
    pub fn from_navigation(navigation: Navigation) -> Self {
        let drawable = navigation.is_drawable();
        Self {
            facility: navigation.facility.as_ref().map(FacilityResult::from_nearest),
            minutes: navigation.minutes,
            drawable,
            waypoints: navigation.waypoints,
            path: navigation.path,
        }
    }
}

/// Request for the banner instruction at a position.
#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    pub position: Coordinate,
    pub waypoints: Vec<Waypoint>,

    /// Search radius in degrees (defaults to roughly 100 m)
    pub radius: Option<f64>,
}

/// Response for the banner lookup.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    /// Instruction to show, if any waypoint is in range
    pub instruction: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nearest_facility_without_candidates() {
        let req: NavigateRequest = serde_json::from_str(
            r#"{
                "origin": {"latitude": 55.86, "longitude": -4.25},
                "destination": {"kind": "nearest_facility"}
            }"#,
        )
        .unwrap();

        let snapshot = vec![Facility::new("Library", 55.87, -4.28)];
        assert_eq!(
            req.destination.into_destination(&snapshot),
            Destination::NearestFacility(snapshot.clone())
        );
    }

    #[test]
    fn parses_explicit_candidates() {
        let req: NavigateRequest = serde_json::from_str(
            r#"{
                "origin": {"latitude": 0.0, "longitude": 0.0},
                "destination": {
                    "kind": "nearest_facility",
                    "facilities": [
                        {"name": "Gym", "latitude": 1.0, "longitude": 1.0, "active": true}
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            req.destination.into_destination(&[]),
            Destination::NearestFacility(vec![Facility::new("Gym", 1.0, 1.0)])
        );
    }

    #[test]
    fn parses_incident_and_stairs() {
        let incident: DestinationRequest = serde_json::from_str(
            r#"{"kind": "incident", "incident": {"latitude": 1.0, "longitude": 2.0}}"#,
        )
        .unwrap();
        let stairs: DestinationRequest = serde_json::from_str(
            r#"{"kind": "stairs", "target": {"latitude": 3.0, "longitude": 4.0}}"#,
        )
        .unwrap();

        assert_eq!(
            incident.into_destination(&[]),
            Destination::Incident(Coordinate::new(1.0, 2.0))
        );
        assert_eq!(
            stairs.into_destination(&[]),
            Destination::Stairs(Coordinate::new(3.0, 4.0))
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<DestinationRequest, _> =
            serde_json::from_str(r#"{"kind": "hospital"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn facility_is_omitted_when_absent() {
        let response = NavigateResponse {
            facility: None,
            minutes: "0".into(),
            drawable: false,
            waypoints: vec![],
            path: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("facility").is_none());
        assert_eq!(json["drawable"], false);
    }
}
