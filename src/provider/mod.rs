//! Geocoding provider abstraction.
//!
//! The service is generic over this trait so the Nominatim client can be
//! swapped for another backend or a test double.

mod nominatim;

use futures::future::BoxFuture;

use crate::error::GeocodeError;
use crate::models::{Coordinates, RawGeocodeRecord};

pub use nominatim::NominatimProvider;

/// A provider that can search free text, look up a place by id and
/// reverse-geocode a point. Each call issues exactly one outbound request.
pub trait GeocodeProvider: Send + Sync {
    /// Forward search, returning raw candidates in provider order.
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawGeocodeRecord>, GeocodeError>>;

    /// Resolve a place id to its coordinates.
    fn details<'a>(
        &'a self,
        place_id: &'a str,
    ) -> BoxFuture<'a, Result<Coordinates, GeocodeError>>;

    /// Reverse geocode; `Ok(None)` when the provider has nothing at the point.
    fn reverse(
        &self,
        point: Coordinates,
    ) -> BoxFuture<'_, Result<Option<RawGeocodeRecord>, GeocodeError>>;
}
