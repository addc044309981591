//! Nominatim HTTP client.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::GeocodeProvider;
use crate::config::{ProviderConfig, MAX_RESULTS};
use crate::error::GeocodeError;
use crate::models::{Coordinates, RawGeocodeRecord};

/// Client for a Nominatim-compatible service (`/search`, `/details`,
/// `/reverse`). No retries and no timeout beyond the transport default.
pub struct NominatimProvider {
    client: Client,
    base_url: Url,
    config: ProviderConfig,
}

impl NominatimProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).context("Invalid provider base URL")?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GeocodeError::Transport(format!("invalid endpoint {}: {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// Free text sent to the provider, with the configured region hint.
    fn query_text(&self, query: &str) -> String {
        match self.config.region_hint.as_deref() {
            Some(hint) if !hint.is_empty() => format!("{} {}", query, hint),
            _ => query.to_string(),
        }
    }

    async fn get_json(&self, url: Url) -> Result<Value, GeocodeError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Transport(format!(
                "{} returned status {}",
                url.path(),
                status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn search_records(&self, query: &str) -> Result<Vec<RawGeocodeRecord>, GeocodeError> {
        let text = self.query_text(query);
        let limit = self.config.limit.clamp(1, MAX_RESULTS).to_string();
        let url = self.endpoint(
            "search",
            &[
                ("q", text.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
                ("accept-language", self.config.language.as_str()),
                ("countrycodes", self.config.country_codes.as_str()),
            ],
        )?;

        parse_search_body(self.get_json(url).await?)
    }

    async fn details_coordinates(&self, place_id: &str) -> Result<Coordinates, GeocodeError> {
        let url = self.endpoint("details", &[("place_id", place_id), ("format", "json")])?;
        let body = self.get_json(url).await?;

        parse_details_geometry(&body)
            .ok_or_else(|| GeocodeError::NoGeometry(place_id.to_string()))
    }

    async fn reverse_record(
        &self,
        point: Coordinates,
    ) -> Result<Option<RawGeocodeRecord>, GeocodeError> {
        let lat = point.latitude.to_string();
        let lon = point.longitude.to_string();
        let url = self.endpoint(
            "reverse",
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("accept-language", self.config.language.as_str()),
            ],
        )?;

        let body = self.get_json(url).await?;
        if let Some(message) = body.get("error") {
            debug!("Reverse lookup found nothing: {}", message);
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(body)?))
    }
}

impl GeocodeProvider for NominatimProvider {
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawGeocodeRecord>, GeocodeError>> {
        Box::pin(self.search_records(query))
    }

    fn details<'a>(
        &'a self,
        place_id: &'a str,
    ) -> BoxFuture<'a, Result<Coordinates, GeocodeError>> {
        Box::pin(self.details_coordinates(place_id))
    }

    fn reverse(
        &self,
        point: Coordinates,
    ) -> BoxFuture<'_, Result<Option<RawGeocodeRecord>, GeocodeError>> {
        Box::pin(self.reverse_record(point))
    }
}

/// The search endpoint answers with a JSON array of place records. A body
/// of any other shape, or any element that isn't a readable record, makes
/// the whole response malformed.
fn parse_search_body(body: Value) -> Result<Vec<RawGeocodeRecord>, GeocodeError> {
    let Value::Array(items) = body else {
        return Err(GeocodeError::MalformedResponse(
            "search response is not a JSON array".to_string(),
        ));
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                GeocodeError::MalformedResponse(format!("search result #{}: {}", index, e))
            })
        })
        .collect::<Result<Vec<RawGeocodeRecord>, GeocodeError>>()?;

    debug!("Provider returned {} records", records.len());
    Ok(records)
}

/// Accepts `geometry.lat`/`geometry.lon` (strings or numbers) or GeoJSON
/// `coordinates: [lon, lat]` on `geometry`, then `centroid`.
fn parse_details_geometry(body: &Value) -> Option<Coordinates> {
    let from_lat_lon = |g: &Value| {
        Some(Coordinates::new(
            degrees(g.get("lat")?)?,
            degrees(g.get("lon")?)?,
        ))
    };
    let from_geojson = |g: &Value| {
        let coords = g.get("coordinates")?.as_array()?;
        Some(Coordinates::new(degrees(coords.get(1)?)?, degrees(coords.first()?)?))
    };

    let geometry = body.get("geometry");
    geometry
        .and_then(from_lat_lon)
        .or_else(|| geometry.and_then(from_geojson))
        .or_else(|| body.get("centroid").and_then(from_geojson))
}

fn degrees(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}
