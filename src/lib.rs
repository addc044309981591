//! AquaNova places - address predictions over a Nominatim-compatible geocoder
//!
//! This library provides the prediction pipeline (bounds filter, relevance
//! sort, label derivation), the provider client and the query service used
//! by the search, map and payment screens.

pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod service;
pub mod session;

pub use error::GeocodeError;
pub use models::{Coordinates, GeoBounds, NormalizedPrediction, RawGeocodeRecord};
pub use provider::{GeocodeProvider, NominatimProvider};
pub use service::{GeocodeQueryService, SearchState};
