//! Rectangular region constraint.

use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::error::GeocodeError;

/// Static bounding box used as the authoritative region restriction.
///
/// Edges are inclusive. Longitudes follow the region's local convention;
/// boxes crossing the antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundsRepr")]
pub struct GeoBounds {
    north: f64,
    south: f64,
    west: f64,
    east: f64,
}

#[derive(Deserialize)]
struct BoundsRepr {
    north: f64,
    south: f64,
    west: f64,
    east: f64,
}

impl TryFrom<BoundsRepr> for GeoBounds {
    type Error = GeocodeError;

    fn try_from(repr: BoundsRepr) -> Result<Self, Self::Error> {
        GeoBounds::new(repr.north, repr.south, repr.west, repr.east)
    }
}

impl GeoBounds {
    /// Venezuela (west and east are negative, western hemisphere)
    pub const VENEZUELA: GeoBounds = GeoBounds {
        north: 12.5,
        south: 0.6,
        west: -73.4,
        east: -59.7,
    };

    pub fn new(north: f64, south: f64, west: f64, east: f64) -> Result<Self, GeocodeError> {
        let finite = [north, south, west, east].iter().all(|v| v.is_finite());
        if !finite || south > north || west > east {
            return Err(GeocodeError::InvalidBounds {
                north,
                south,
                west,
                east,
            });
        }
        Ok(Self {
            north,
            south,
            west,
            east,
        })
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Coordinates) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::VENEZUELA
    }
}
