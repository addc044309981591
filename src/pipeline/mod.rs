//! Normalization pipeline: bounds filter, relevance sort, label derivation.
//!
//! Order matters. Records are filtered before sorting so malformed
//! coordinates never take part in ranking, and labels are derived last so
//! that only surviving records pay for it.

mod labels;

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::models::{GeoBounds, NormalizedPrediction, RawGeocodeRecord};

pub use labels::{derive_labels, primary_label, secondary_label, Labels};

/// Run the full pipeline over one provider response batch.
pub fn normalize(
    records: Vec<RawGeocodeRecord>,
    bounds: &GeoBounds,
) -> Vec<NormalizedPrediction> {
    let received = records.len();

    let mut records = filter_in_bounds(records, bounds);
    let in_bounds = records.len();

    sort_by_importance(&mut records);

    let mut seen = HashSet::new();
    let predictions: Vec<NormalizedPrediction> = records
        .into_iter()
        .filter_map(to_prediction)
        .filter(|p| seen.insert(p.id.clone()))
        .collect();

    debug!(
        "Normalized {} records: {} in bounds, {} labelled",
        received,
        in_bounds,
        predictions.len()
    );

    predictions
}

/// Drop records with missing, non-numeric or out-of-bounds coordinates.
pub fn filter_in_bounds(
    records: Vec<RawGeocodeRecord>,
    bounds: &GeoBounds,
) -> Vec<RawGeocodeRecord> {
    records
        .into_iter()
        .filter(|r| match r.coordinates() {
            Some(point) => bounds.contains(point),
            None => false,
        })
        .collect()
}

/// Stable sort, most important first. Scores that compare equal (including
/// `-0.0` and `0.0`) keep provider order.
pub fn sort_by_importance(records: &mut [RawGeocodeRecord]) {
    records.sort_by(|a, b| {
        b.importance()
            .partial_cmp(&a.importance())
            .unwrap_or(Ordering::Equal)
    });
}

/// Label one record; `None` when no primary label can be derived.
pub fn to_prediction(record: RawGeocodeRecord) -> Option<NormalizedPrediction> {
    let Labels { primary, secondary } = derive_labels(&record);
    if primary.is_empty() {
        return None;
    }

    Some(NormalizedPrediction {
        id: record.place_id.to_string(),
        full_address: record.display_name,
        primary_label: primary,
        secondary_label: secondary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderId;

    fn located(id: u64, lat: &str, lon: &str, importance: f64) -> RawGeocodeRecord {
        let mut r = RawGeocodeRecord::new(
            ProviderId::Numeric(id),
            &format!("Place {}, Caracas, Venezuela", id),
        );
        r.lat = Some(lat.to_string());
        r.lon = Some(lon.to_string());
        r.importance = Some(importance);
        r
    }

    fn ids(predictions: &[NormalizedPrediction]) -> Vec<&str> {
        predictions.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_drops_missing_and_malformed_coordinates() {
        let mut missing = located(1, "10.5", "-66.9", 0.5);
        missing.lon = None;
        let malformed = located(2, "abc", "-66.9", 0.5);
        let good = located(3, "10.5", "-66.9", 0.5);

        let out = normalize(vec![missing, malformed, good], &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn test_drops_out_of_bounds_keeps_edges() {
        let records = vec![
            located(1, "4.6", "-74.1", 0.9),  // Bogotá
            located(2, "12.5", "-73.4", 0.1), // north-west corner
            located(3, "0.6", "-59.7", 0.2),  // south-east corner
        ];

        let out = normalize(records, &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["3", "2"]);
    }

    #[test]
    fn test_sort_descending_and_stable() {
        let records = vec![
            located(1, "10.5", "-66.9", 0.2),
            located(2, "10.5", "-66.9", 0.7),
            located(3, "10.5", "-66.9", 0.2),
            located(4, "10.5", "-66.9", 0.9),
            located(5, "10.5", "-66.9", 0.2),
        ];

        let out = normalize(records, &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["4", "2", "1", "3", "5"]);
    }

    #[test]
    fn test_signed_zero_importance_is_a_tie() {
        let records = vec![
            located(1, "10.5", "-66.9", -0.0),
            located(2, "10.5", "-66.9", 0.0),
            located(3, "10.5", "-66.9", -0.0),
        ];

        let out = normalize(records, &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_missing_importance_ranks_last() {
        let mut unranked = located(1, "10.5", "-66.9", 0.0);
        unranked.importance = None;
        let ranked = located(2, "10.5", "-66.9", 0.01);

        let out = normalize(vec![unranked, ranked], &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn test_empty_primary_label_excluded() {
        let mut blank = located(1, "10.5", "-66.9", 0.9);
        blank.place_class = Some("place".into());
        let kept = located(2, "10.5", "-66.9", 0.1);

        let out = normalize(vec![blank, kept], &GeoBounds::VENEZUELA);
        assert_eq!(ids(&out), vec!["2"]);
        assert!(out.iter().all(|p| !p.primary_label.is_empty()));
    }

    #[test]
    fn test_duplicate_ids_keep_highest_ranked() {
        let mut low = located(7, "10.5", "-66.9", 0.1);
        low.name = Some("Low".into());
        let mut high = located(7, "10.5", "-66.9", 0.8);
        high.name = Some("High".into());

        let out = normalize(vec![low, high], &GeoBounds::VENEZUELA);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].primary_label, "High");
    }

    #[test]
    fn test_prediction_fields() {
        let mut r = located(42, "10.4996", "-66.8837", 0.5);
        r.display_name = "Plaza Venezuela, Caracas, Venezuela".into();
        r.address.city = Some("Caracas".into());
        r.address.state = Some("Distrito Capital".into());

        let out = normalize(vec![r], &GeoBounds::VENEZUELA);
        assert_eq!(
            out,
            vec![NormalizedPrediction {
                id: "42".into(),
                full_address: "Plaza Venezuela, Caracas, Venezuela".into(),
                primary_label: "Plaza Venezuela".into(),
                secondary_label: "Caracas, Distrito Capital".into(),
            }]
        );
    }

    #[test]
    fn test_nothing_in_bounds() {
        let records = vec![
            located(1, "40.4", "-3.7", 0.9),
            located(2, "-34.6", "-58.4", 0.8),
        ];
        assert!(normalize(records, &GeoBounds::VENEZUELA).is_empty());
    }
}
