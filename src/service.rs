//! Geocode query service: the collaborator-facing surface.
//!
//! Search state (loading flag and the last published prediction list) lives
//! in a `watch` channel so screens can observe it without the pipeline
//! depending on any render cycle. Every search takes a sequence number;
//! only the response of the most recent search is ever published.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::GeocodeError;
use crate::models::{Coordinates, GeoBounds, NormalizedPrediction};
use crate::pipeline;
use crate::provider::GeocodeProvider;

/// Snapshot published to observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub loading: bool,
    pub predictions: Vec<NormalizedPrediction>,
}

pub struct GeocodeQueryService<P> {
    provider: P,
    bounds: GeoBounds,
    sequence: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl<P: GeocodeProvider> GeocodeQueryService<P> {
    pub fn new(provider: P, bounds: GeoBounds) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            provider,
            bounds,
            sequence: AtomicU64::new(0),
            state,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// Observe loading/prediction changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn predictions(&self) -> Vec<NormalizedPrediction> {
        self.state.borrow().predictions.clone()
    }

    /// Search and publish the results.
    ///
    /// An empty query clears the published list without a request. A call
    /// overtaken by a newer one returns an empty list and publishes nothing;
    /// the newer call owns the loading flag.
    pub async fn search_predictions(&self, query: &str) -> Vec<NormalizedPrediction> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();

        if query.is_empty() {
            self.state.send_modify(|s| {
                s.loading = false;
                s.predictions.clear();
            });
            return Vec::new();
        }

        self.state.send_modify(|s| s.loading = true);
        let predictions = self.predict(query).await;

        if self.sequence.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale results for search #{} ({:?})", seq, query);
            return Vec::new();
        }

        self.state.send_modify(|s| {
            s.loading = false;
            s.predictions = predictions.clone();
        });
        predictions
    }

    /// One provider search run through the normalization pipeline, without
    /// touching the published state. Failures are logged and yield an empty
    /// list.
    pub async fn predict(&self, query: &str) -> Vec<NormalizedPrediction> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.provider.search(query).await {
            Ok(records) => {
                let predictions = pipeline::normalize(records, &self.bounds);
                info!("Search {:?}: {} predictions", query, predictions.len());
                predictions
            }
            Err(e) => {
                error!("Search {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Resolve a prediction id to coordinates.
    pub async fn resolve_coordinates(&self, prediction_id: &str) -> Option<Coordinates> {
        if prediction_id.trim().is_empty() {
            return None;
        }

        match self.provider.details(prediction_id).await {
            Ok(coords) => Some(coords),
            Err(GeocodeError::NoGeometry(id)) => {
                warn!("Place {} has no resolvable geometry", id);
                None
            }
            Err(e) => {
                error!("Resolving place {} failed: {}", prediction_id, e);
                None
            }
        }
    }

    /// Address at a point, labelled like a search result. Absent when the
    /// provider finds nothing, the result falls outside the bounds, or the
    /// request fails.
    pub async fn reverse_lookup(&self, point: Coordinates) -> Option<NormalizedPrediction> {
        match self.provider.reverse(point).await {
            Ok(Some(record)) => pipeline::normalize(vec![record], &self.bounds)
                .into_iter()
                .next(),
            Ok(None) => None,
            Err(e) => {
                error!(
                    "Reverse lookup at ({}, {}) failed: {}",
                    point.latitude, point.longitude, e
                );
                None
            }
        }
    }
}
