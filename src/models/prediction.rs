//! Output types handed to callers.

use serde::{Deserialize, Serialize};

/// A normalized, user-displayable address candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPrediction {
    /// Provider id, unique within one response batch
    pub id: String,
    /// Provider's full free-text address
    pub full_address: String,
    /// Never empty
    pub primary_label: String,
    /// May be empty
    pub secondary_label: String,
}

/// Geographic point (lat/lon) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
