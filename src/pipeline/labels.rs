//! Two-line "main / secondary" label derivation.

use crate::models::RawGeocodeRecord;

/// Derived display labels for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub primary: String,
    pub secondary: String,
}

/// Derive both labels. Pure; the primary label may come back empty, in which
/// case the caller drops the record.
pub fn derive_labels(record: &RawGeocodeRecord) -> Labels {
    Labels {
        primary: primary_label(record),
        secondary: secondary_label(record),
    }
}

/// Precedence: proper name, then city/municipality for settlements, then
/// street-level components, then the first segment of the display name.
pub fn primary_label(record: &RawGeocodeRecord) -> String {
    if let Some(name) = non_empty(&record.name) {
        return name.to_string();
    }

    let address = &record.address;
    let is_settlement = record.place_type.as_deref() == Some("city")
        || record.place_class.as_deref() == Some("place");

    if is_settlement {
        return non_empty(&address.city)
            .or_else(|| non_empty(&address.municipality))
            .unwrap_or_default()
            .to_string();
    }

    let parts: Vec<&str> = [
        &address.house_number,
        &address.road,
        &address.park,
        &address.railway,
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect();

    if !parts.is_empty() {
        return parts.join(" ");
    }

    let head = record.display_name.split(',').next().unwrap_or("");
    if head.trim().is_empty() {
        return String::new();
    }
    head.to_string()
}

/// Neighbourhood (or quarter), suburb, city (or municipality), state.
pub fn secondary_label(record: &RawGeocodeRecord) -> String {
    let address = &record.address;
    let parts: Vec<&str> = [
        non_empty(&address.neighbourhood).or_else(|| non_empty(&address.quarter)),
        non_empty(&address.suburb),
        non_empty(&address.city).or_else(|| non_empty(&address.municipality)),
        non_empty(&address.state),
    ]
    .into_iter()
    .flatten()
    .collect();

    parts.join(", ")
}

/// The value as supplied, unless it is missing or blank.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
