//! Provider records as returned by a Nominatim-compatible search endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use super::Coordinates;

/// Provider-specific place identifier (Nominatim sends a number, other
/// providers send strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderId {
    Numeric(u64),
    Text(String),
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderId::Numeric(id) => write!(f, "{}", id),
            ProviderId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Address components. The provider supplies whichever apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(
        rename = "house_number",
        alias = "houseNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub park: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub railway: Option<String>,
}

/// One unprocessed place candidate.
///
/// Coordinates are kept as the provider's raw text; they are parsed (and
/// rejected when malformed) by the bounds filter, never at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeocodeRecord {
    pub place_id: ProviderId,

    #[serde(default)]
    pub display_name: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub lat: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub lon: Option<String>,

    /// Relevance score, higher is better. No fixed range.
    #[serde(default)]
    pub importance: Option<f64>,

    #[serde(default, rename = "type")]
    pub place_type: Option<String>,

    #[serde(default, rename = "class")]
    pub place_class: Option<String>,

    #[serde(default)]
    pub address: AddressComponents,

    #[serde(default)]
    pub name: Option<String>,
}

impl RawGeocodeRecord {
    /// Minimal record, mostly useful for building fixtures.
    pub fn new(place_id: ProviderId, display_name: &str) -> Self {
        Self {
            place_id,
            display_name: display_name.to_string(),
            lat: None,
            lon: None,
            importance: None,
            place_type: None,
            place_class: None,
            address: AddressComponents::default(),
            name: None,
        }
    }

    /// Parsed coordinates, or `None` if either value is missing or not a
    /// finite number.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let latitude = parse_degrees(self.lat.as_deref()?)?;
        let longitude = parse_degrees(self.lon.as_deref()?)?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Importance with missing or NaN scores ranked as zero.
    pub fn importance(&self) -> f64 {
        match self.importance {
            Some(score) if !score.is_nan() => score,
            _ => 0.0,
        }
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `"10.49"`, `10.49` or `null`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
    }))
}
