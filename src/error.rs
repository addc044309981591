//! Error taxonomy for provider calls.
//!
//! None of these reach callers of [`crate::GeocodeQueryService`]; the service
//! logs them and degrades to an empty list or an absent value.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network unreachable or a non-2xx status
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON parse failure or missing expected fields
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Details lookup returned no usable geometry
    #[error("no geometry for place {0}")]
    NoGeometry(String),

    #[error("invalid bounds: north={north} south={south} west={west} east={east}")]
    InvalidBounds {
        north: f64,
        south: f64,
        west: f64,
        east: f64,
    },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GeocodeError::MalformedResponse(e.to_string())
        } else {
            GeocodeError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(e: serde_json::Error) -> Self {
        GeocodeError::MalformedResponse(e.to_string())
    }
}
