//! Planar coordinate type and trip geometry.
//!
//! All distances are straight-line Euclidean distances on an abstract plane;
//! units are whatever the input document uses.

use crate::{CoreError, CoreResult};

/// A point on the delivery plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 2]", into = "[f64; 2]"))]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Like [`new`](Self::new) but rejects NaN and infinite coordinates.
    pub fn try_new(x: f64, y: f64) -> CoreResult<Self> {
        let loc = Self { x, y };
        if loc.is_finite() {
            Ok(loc)
        } else {
            Err(CoreError::NonFiniteCoordinate { x, y })
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(self, other: Location) -> f64 {
        distance(self, other)
    }
}

impl From<[f64; 2]> for Location {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> Self {
        [loc.x, loc.y]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Straight-line distance between two points.
#[inline]
pub fn distance(a: Location, b: Location) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Length of a delivery trip: agent → warehouse pickup → destination drop-off.
#[inline]
pub fn trip_distance(agent: Location, warehouse: Location, destination: Location) -> f64 {
    distance(agent, warehouse) + distance(warehouse, destination)
}
