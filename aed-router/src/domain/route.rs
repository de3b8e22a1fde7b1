//! Route shapes: the provider's nested route and the assembled output.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Instruction used for the synthetic first waypoint of a stairs route.
pub const STAIRS_INSTRUCTION: &str = "Head to the stairs/lift";

/// A route as returned by the routing provider.
///
/// Legs and steps are in walking order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRoute {
    pub legs: Vec<RouteLeg>,
    /// Encoded polyline for the whole route, when the provider sends one.
    pub polyline: Option<String>,
}

impl RawRoute {
    pub fn new(legs: Vec<RouteLeg>) -> Self {
        Self {
            legs,
            polyline: None,
        }
    }

    pub fn with_polyline(mut self, polyline: impl Into<String>) -> Self {
        self.polyline = Some(polyline.into());
        self
    }

    /// Total number of steps across all legs.
    pub fn step_count(&self) -> usize {
        self.legs.iter().map(|l| l.steps.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteLeg {
    pub steps: Vec<RouteStep>,
}

impl RouteLeg {
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }
}

/// One step of a leg.
///
/// Either field may be missing; the assembler skips steps it cannot use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteStep {
    pub instruction: Option<String>,
    pub polyline: Option<String>,
}

impl RouteStep {
    pub fn new(instruction: impl Into<String>, polyline: impl Into<String>) -> Self {
        Self {
            instruction: Some(instruction.into()),
            polyline: Some(polyline.into()),
        }
    }

    /// A step with geometry but no instruction.
    pub fn unnamed(polyline: impl Into<String>) -> Self {
        Self {
            instruction: None,
            polyline: Some(polyline.into()),
        }
    }
}

/// One point of an assembled route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub instruction: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    pub fn new(instruction: impl Into<String>, at: Coordinate) -> Self {
        Self {
            instruction: instruction.into(),
            latitude: at.latitude,
            longitude: at.longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Which synthetic endpoint an assembled route is closed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scenario {
    /// Walking to the resolved AED.
    ToFacility { facility: Coordinate },
    /// Walking back to the recorded incident location.
    BackToIncident { incident: Coordinate },
    /// Walking to the stairs or lift on the way down from an upper floor.
    ToStairs { target: Coordinate },
}

impl Scenario {
    /// The coordinate appended as the last waypoint.
    pub fn endpoint(&self) -> Coordinate {
        match self {
            Scenario::ToFacility { facility } => *facility,
            Scenario::BackToIncident { incident } => *incident,
            Scenario::ToStairs { target } => *target,
        }
    }

    /// Instruction for the prepended origin waypoint.
    ///
    /// `first` is the instruction of the first decoded waypoint.
    pub fn head_instruction<'a>(&self, first: &'a str) -> &'a str {
        match self {
            Scenario::ToStairs { .. } => STAIRS_INSTRUCTION,
            Scenario::ToFacility { .. } | Scenario::BackToIncident { .. } => first,
        }
    }
}
