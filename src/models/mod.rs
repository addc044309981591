//! Core data models for the prediction pipeline.

pub mod bounds;
pub mod prediction;
pub mod raw;

pub use bounds::GeoBounds;
pub use prediction::{Coordinates, NormalizedPrediction};
pub use raw::{AddressComponents, ProviderId, RawGeocodeRecord};
